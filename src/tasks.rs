use std::future::Future;
use tokio::task::JoinHandle;

/// Requests spawned by one page mount
///
/// Tearing the page down cancels whatever is still running instead of
/// letting late results land on a page that is gone. Dropping the scope
/// cancels too.
#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Vec<JoinHandle<()>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(tokio::spawn(task));
    }

    /// Number of tasks that have not finished yet
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every unfinished task, returning how many were aborted
    pub fn cancel(&mut self) -> usize {
        let mut aborted = 0;
        for handle in self.handles.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
