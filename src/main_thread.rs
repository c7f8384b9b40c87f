//! The main-thread task queue.
//!
//! Worker threads can't touch the graphics context. They post closures here instead, and the
//! thread that owns the context runs them once per frame.

use crate::backend::GpuContext;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

/// A closure that must run on the thread owning the graphics context.
pub type MainThreadTask = Box<dyn FnOnce(&mut dyn GpuContext) + Send>;

/// A multi-producer queue of [`MainThreadTask`]s.
#[derive(Clone)]
pub struct MainThreadQueue {
    sender: Sender<MainThreadTask>,
    receiver: Receiver<MainThreadTask>,
}

impl MainThreadQueue {
    pub fn new() -> MainThreadQueue {
        let (sender, receiver) = channel::unbounded();
        MainThreadQueue { sender, receiver }
    }

    /// Enqueues a task. Can be called from any thread.
    pub fn post(&self, task: MainThreadTask) {
        // the queue holds its own receiver, so the channel can't be disconnected
        let _ = self.sender.send(task);
    }

    /// Number of tasks waiting.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Runs the tasks that were queued when this was called and returns how many ran.
    ///
    /// Tasks posted while draining wait for the next call.
    pub fn drain(&self, gpu: &mut dyn GpuContext) -> usize {
        let pending = self.receiver.len();
        let mut ran = 0;
        while ran < pending {
            match self.receiver.try_recv() {
                Ok(task) => {
                    task(gpu);
                    ran += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ran
    }
}

impl Default for MainThreadQueue {
    fn default() -> Self {
        MainThreadQueue::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingCanvas;
    use std::thread;

    #[test]
    fn tasks_run_on_drain_only() {
        let queue = MainThreadQueue::new();
        let worker_queue = queue.clone();
        thread::spawn(move || {
            worker_queue.post(Box::new(|gpu: &mut dyn GpuContext| {
                gpu.create_image_rgba(1, 1, &[0, 0, 0, 255]);
            }));
        })
        .join()
        .unwrap();

        let mut gpu = RecordingCanvas::default();
        assert_eq!(queue.len(), 1);
        assert!(gpu.images.is_empty());

        assert_eq!(queue.drain(&mut gpu), 1);
        assert_eq!(gpu.images.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn tasks_posted_while_draining_wait() {
        let queue = MainThreadQueue::new();
        let inner = queue.clone();
        queue.post(Box::new(move |_: &mut dyn GpuContext| {
            inner.post(Box::new(|_: &mut dyn GpuContext| ()));
        }));

        let mut gpu = RecordingCanvas::default();
        assert_eq!(queue.drain(&mut gpu), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain(&mut gpu), 1);
    }
}
