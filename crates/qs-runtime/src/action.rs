use qs_core::{ActorContext, QuestError};

/// A script line that can run with or without an actor.
pub trait NullableAction: Send + Sync {
    fn execute(&self, context: Option<&ActorContext>) -> Result<(), QuestError>;
}

/// Entry point for dispatchers that only fire with a concrete actor.
pub trait ActorAction {
    fn execute_for(&self, actor: &ActorContext) -> Result<(), QuestError>;
}

/// Entry point for dispatchers that fire without any actor, e.g. schedules.
pub trait ActorlessAction {
    fn execute_without_actor(&self) -> Result<(), QuestError>;
}

impl<A: NullableAction + ?Sized> ActorAction for A {
    fn execute_for(&self, actor: &ActorContext) -> Result<(), QuestError> {
        self.execute(Some(actor))
    }
}

impl<A: NullableAction + ?Sized> ActorlessAction for A {
    fn execute_without_actor(&self) -> Result<(), QuestError> {
        self.execute(None)
    }
}
