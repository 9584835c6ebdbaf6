//! Simulation-thread task queue
//!
//! A [`TaskQueue`] is owned by the frame driver. Other threads hold a
//! cloneable [`TaskSender`] and never touch the server directly.

use crossbeam_channel::{bounded, Receiver, SendError, Sender, TrySendError};
use s2net_engine::NetworkGameServer;

/// A task to execute on the simulation thread
pub type Task = Box<dyn FnOnce(&NetworkGameServer) + Send + 'static>;

/// Capacity of the task queue, also the per-frame processing cap
pub const QUEUE_CAPACITY: usize = 1024;

/// Task queue errors
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The queue is at capacity, the task was dropped
    #[error("Task queue full")]
    QueueFull,

    /// The owning frame driver is gone
    #[error("Task queue disconnected")]
    Disconnected,
}

/// Bounded queue of tasks drained once per frame
pub struct TaskQueue {
    sender: Sender<Task>,
    receiver: Receiver<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(QUEUE_CAPACITY);
        Self { sender, receiver }
    }

    /// Handle for queueing work from any thread
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            sender: self.sender.clone(),
        }
    }

    /// Run queued tasks against `server`
    ///
    /// Runs at most [`QUEUE_CAPACITY`] tasks, so tasks queued by tasks wait
    /// for the next frame.
    ///
    /// Returns the number of tasks processed.
    #[tracing::instrument(skip_all)]
    pub fn process(&self, server: &NetworkGameServer) -> usize {
        let mut count = 0;

        while let Ok(task) = self.receiver.try_recv() {
            task(server);
            count += 1;

            if count >= QUEUE_CAPACITY {
                break;
            }
        }

        count
    }

    /// Check how many tasks are currently queued
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`TaskQueue`]
#[derive(Clone)]
pub struct TaskSender {
    sender: Sender<Task>,
}

impl TaskSender {
    /// Queue a task to execute on the next game frame
    ///
    /// This is safe to call from any thread.
    ///
    /// # Returns
    /// - `Ok(())` if the task was queued
    /// - `Err(TaskError::QueueFull)` if the queue is full (task is dropped)
    #[tracing::instrument(skip_all)]
    pub fn queue_task<F>(&self, task: F) -> Result<(), TaskError>
    where
        F: FnOnce(&NetworkGameServer) + Send + 'static,
    {
        match self.sender.try_send(Box::new(task)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Task queue full, dropping task");
                Err(TaskError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Task queue disconnected");
                Err(TaskError::Disconnected)
            }
        }
    }

    /// Queue a task, blocking if the queue is full
    ///
    /// # Warning
    /// Only call from background threads, never from the simulation thread
    /// (would deadlock if the queue is full and waiting for a frame)
    #[tracing::instrument(skip_all)]
    pub fn queue_task_blocking<F>(&self, task: F) -> Result<(), TaskError>
    where
        F: FnOnce(&NetworkGameServer) + Send + 'static,
    {
        self.sender.send(Box::new(task)).map_err(|SendError(_)| {
            tracing::error!("Failed to queue task (blocking): disconnected");
            TaskError::Disconnected
        })
    }
}
