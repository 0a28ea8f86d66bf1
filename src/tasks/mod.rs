pub mod client;
pub mod dispatcher;
pub mod dto;

pub use client::{HttpTaskClient, TaskSubmitter};
pub use dispatcher::MutationDispatcher;
pub use dto::{Job, TaskEnvelope, TaskHandle};
