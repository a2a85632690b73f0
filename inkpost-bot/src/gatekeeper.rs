//! Single-admin authorization.

use inkpost_core::ActorId;

/// Gate in front of the conversation engine: exactly one account, fixed
/// at startup, may drive it. There are no roles and no runtime grants.
#[derive(Debug, Clone, Copy)]
pub struct Gatekeeper {
    admin: ActorId,
}

impl Gatekeeper {
    pub fn new(admin: ActorId) -> Self {
        Self { admin }
    }

    pub fn allows(&self, actor: ActorId) -> bool {
        actor == self.admin
    }
}
