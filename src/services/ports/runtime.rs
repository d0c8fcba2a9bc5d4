use std::future::Future;
use std::pin::Pin;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Fire-and-forget task spawner.
///
/// Decouples services from the concrete runtime: production wires a tokio
/// handle, tests wire an inline or dropping executor. Spawned tasks are never
/// joined by the caller.
pub trait AsyncExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture);
}
