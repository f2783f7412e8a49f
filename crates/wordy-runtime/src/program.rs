#![forbid(unsafe_code)]

//! Elm-style model/command runtime.
//!
//! A [`Model`] reacts to messages by mutating itself and returning a
//! [`Cmd`] describing side effects. [`Program`] owns the model and a single
//! FIFO message queue: messages are processed strictly in the order they
//! were enqueued, and effects are collected in an outbox for the host to
//! execute. Effect results come back as ordinary messages.
//!
//! Nothing here suspends or spawns. The host decides when an effect runs,
//! which is what lets tests deliver lookup responses late or out of order.

use std::collections::VecDeque;

/// The state side of a program.
pub trait Model: Sized {
    /// Messages that update the model.
    type Message;

    /// Side effects the model asks the host to perform.
    type Effect;

    /// Startup commands, run once by [`Program::start`].
    fn init(&mut self) -> Cmd<Self::Message, Self::Effect> {
        Cmd::none()
    }

    /// Apply one message. This is the only place model state changes.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message, Self::Effect>;
}

/// Commands returned from [`Model::init`] and [`Model::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd<M, E> {
    /// No operation.
    None,
    /// Several commands, flattened in order.
    Batch(Vec<Cmd<M, E>>),
    /// Enqueue a message behind everything already queued.
    Msg(M),
    /// Ask the host to perform an effect.
    Effect(E),
}

impl<M, E> Cmd<M, E> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn effect(e: E) -> Self {
        Self::Effect(e)
    }

    /// Create a batch, collapsing empty and single-element lists.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M, E> Default for Cmd<M, E> {
    fn default() -> Self {
        Self::None
    }
}

/// Owns a model, its message queue, and the effect outbox.
pub struct Program<M: Model> {
    model: M,
    queue: VecDeque<M::Message>,
    outbox: VecDeque<M::Effect>,
    started: bool,
    processed: u64,
}

impl<M: Model> Program<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            outbox: VecDeque::new(),
            started: false,
            processed: 0,
        }
    }

    /// Run [`Model::init`] once. Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let cmd = self.model.init();
        self.execute(cmd);
        self.drain();
    }

    /// Enqueue a message and process the queue until it is empty.
    pub fn send(&mut self, msg: M::Message) {
        self.queue.push_back(msg);
        self.drain();
    }

    /// Take every effect produced so far, oldest first.
    pub fn take_effects(&mut self) -> Vec<M::Effect> {
        self.outbox.drain(..).collect()
    }

    /// Whether effects are waiting in the outbox.
    pub fn has_effects(&self) -> bool {
        !self.outbox.is_empty()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Number of messages processed since creation.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    fn drain(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            self.processed += 1;
            let cmd = self.model.update(msg);
            self.execute(cmd);
        }
    }

    fn execute(&mut self, cmd: Cmd<M::Message, M::Effect>) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
            Cmd::Msg(msg) => self.queue.push_back(msg),
            Cmd::Effect(effect) => self.outbox.push_back(effect),
        }
    }
}
