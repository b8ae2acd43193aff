//! Domain model for the task board.
//!
//! The domain covers the task entity, validated change sets, the drag gesture
//! state machine, and the board projection. Nothing here performs I/O; the
//! remote store and the cache live behind ports and services.

mod age;
mod board;
mod changes;
mod drag;
mod error;
mod ids;
mod task;

pub use age::describe_time_since;
pub use board::{BoardCounts, BoardProjection};
pub use changes::{DescriptionChange, NewTask, TaskPatch};
pub use drag::{DragState, DropDecision};
pub use error::{DragError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus};
