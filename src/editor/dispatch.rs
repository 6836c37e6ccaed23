//! Decides what the repeat key does.
//!
//! When the registered action is still in sync with the document it is
//! replayed with the right count and register; otherwise the host's own
//! repeat runs with the user's count.

use super::context::RepeatContext;
use super::error::RepeatError;
use super::registers::RegisterName;
use super::repeat::{ActionRegistry, RepeatCount};
use crate::config::{AssociationPolicy, Config};
use crate::document::Revision;
use crate::host::Host;
use crate::input::{Feed, KeySequence, Placement, Remap};

/// Arguments of one press of the repeat key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatRequest {
    /// Count typed before the key, 0 if none
    pub count: u32,
    /// Register selected before the key; the default register if none
    pub register: RegisterName,
    /// Current revision of the document, if the host knows it
    pub revision: Option<Revision>,
}

/// A replay of the registered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub register: Option<RegisterName>,
    pub count: Option<u32>,
    /// Register selection keys, including the evaluated expression if any
    pub register_keys: KeySequence,
    pub sequence: KeySequence,
}

impl Replay {
    /// Register prefix followed by count prefix.
    pub fn prefix(&self) -> KeySequence {
        self.register_keys
            .then(&KeySequence::count(self.count.unwrap_or(0)))
    }

    /// The keys in the order the host will execute them.
    pub fn keys(&self) -> KeySequence {
        self.prefix().then(&self.sequence)
    }
}

/// Outcome of the repeat key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The host's own repeat, with the count already prepended
    Native { keys: KeySequence },
    Replay(Replay),
}

impl Dispatch {
    pub fn is_replay(&self) -> bool {
        matches!(self, Dispatch::Replay(_))
    }

    pub fn keys(&self) -> KeySequence {
        match self {
            Dispatch::Native { keys } => keys.clone(),
            Dispatch::Replay(replay) => replay.keys(),
        }
    }

    /// The single feed that realizes this dispatch.
    ///
    /// A replay's prefix is fed literally and its sequence may be remapped;
    /// both travel in one feed so the host takes all of it or none of it.
    pub fn feed(&self) -> Feed {
        match self {
            Dispatch::Native { keys } => Feed::ahead(keys.clone(), Remap::NoRemap),
            Dispatch::Replay(replay) => Feed::at(Placement::AheadOfPending)
                .with(replay.prefix(), Remap::NoRemap)
                .with(replay.sequence.clone(), Remap::Remap),
        }
    }
}

/// Count to replay with. An explicit count replaces the recorded one; the two
/// are never multiplied.
pub fn effective_count(explicit: u32, recorded: RepeatCount) -> Option<u32> {
    match recorded {
        RepeatCount::Suppressed => None,
        _ if explicit > 0 => Some(explicit),
        recorded => recorded.times(),
    }
}

/// Register to replay with: an explicit non-default register, else the
/// register associated with the current action.
pub fn effective_register(
    explicit: RegisterName,
    registry: &ActionRegistry,
    config: &Config,
) -> Option<RegisterName> {
    let default = config.default_register();
    if explicit != default {
        return Some(explicit);
    }

    match config.register_association {
        AssociationPolicy::Disabled => None,
        AssociationPolicy::MatchSequence => registry
            .current_association()
            .filter(|register| *register != default),
    }
}

pub struct RepeatDispatcher<'a> {
    config: &'a Config,
}

impl<'a> RepeatDispatcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Chooses between replay and native repeat without touching the host.
    ///
    /// `expression` is only called when the expression register is replayed,
    /// so its source is read fresh on every repeat.
    pub fn decide(
        &self,
        ctx: &RepeatContext,
        request: &RepeatRequest,
        expression: impl FnOnce() -> String,
    ) -> Dispatch {
        let action = match ctx.registry().action() {
            Some(action) if ctx.is_synced_at(request.revision) => action,
            _ => {
                let keys = KeySequence::count(request.count).then(&self.config.native_repeat_keys());
                tracing::debug!(keys = %keys, "repeat falls back to native");
                return Dispatch::Native { keys };
            }
        };

        let count = effective_count(request.count, action.count);
        let register = effective_register(request.register, ctx.registry(), self.config);
        let register_keys = match register {
            Some(register) if register.is_expression() => register
                .prefix()
                .then(&KeySequence::new(expression()))
                .then(&self.config.expression_commit_keys()),
            Some(register) => register.prefix(),
            None => KeySequence::empty(),
        };

        let replay = Replay {
            register,
            count,
            register_keys,
            sequence: action.sequence.clone(),
        };
        tracing::debug!(keys = %replay.keys(), "repeat replays registered action");
        Dispatch::Replay(replay)
    }

    /// Decides and feeds the result to the host.
    ///
    /// A rejected feed is remembered as the context's last error.
    pub fn run<H: Host>(
        &self,
        ctx: &mut RepeatContext,
        request: &RepeatRequest,
        host: &mut H,
    ) -> Result<Dispatch, RepeatError> {
        ctx.clear_error();
        let dispatch = self.decide(ctx, request, || host.expression_register());
        if let Err(err) = host.feed(dispatch.feed()) {
            ctx.record_error(err.to_string());
            return Err(err.into());
        }
        Ok(dispatch)
    }
}
