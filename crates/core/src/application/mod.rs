// Application Layer - Use Cases and Business Logic

pub mod access;
pub mod estimator;
pub mod maintenance;
pub mod queue;

// Re-exports
pub use access::AccessService;
pub use estimator::WaitEstimator;
pub use maintenance::RepairScheduler;
pub use queue::QueueService;
