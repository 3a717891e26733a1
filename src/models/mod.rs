pub mod session;
pub mod task;
pub mod user;

pub use session::Session;
pub use task::{CompletionUpdate, NewTask, Task, TaskInput, TaskPriority};
pub use user::{User, UserRecord};
