use thiserror::Error;

/// Reading a [`Sum`] as an alternative that is not the active one.
///
/// This signals a logic error in the caller: either a wrong assumption
/// about which alternative is live, or a handler list that does not cover
/// it.
///
/// [`Sum`]: crate::Sum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidVariantAccess {
    /// Ordinal access with an index other than the active one.
    #[error("indexing with {requested}, but the active index is {active}")]
    WrongIndex { requested: usize, active: usize },

    /// A match ran out of handlers before one accepted the active alternative.
    #[error("no handler accepts the active alternative {active} (`{type_name}`)")]
    Unhandled {
        active: usize,
        type_name: &'static str,
    },
}

impl InvalidVariantAccess {
    pub(crate) fn wrong_index(requested: u8, active: u8) -> Self {
        tracing::debug!(requested, active, "invalid variant access by index");
        InvalidVariantAccess::WrongIndex {
            requested: requested.into(),
            active: active.into(),
        }
    }

    pub(crate) fn unhandled(active: u8, type_name: &'static str) -> Self {
        tracing::debug!(active, type_name, "no handler for the active alternative");
        InvalidVariantAccess::Unhandled {
            active: active.into(),
            type_name,
        }
    }

    /// The ordinal that was active when the access failed.
    pub fn active(&self) -> usize {
        match *self {
            InvalidVariantAccess::WrongIndex { active, .. }
            | InvalidVariantAccess::Unhandled { active, .. } => active,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn messages_name_both_ordinals() {
        let err = InvalidVariantAccess::wrong_index(1, 0);
        assert_eq!(err.to_string(), "indexing with 1, but the active index is 0");
        assert_eq!(err.active(), 0);
    }

    #[test]
    fn unhandled_names_the_type() {
        let err = InvalidVariantAccess::unhandled(2, "alloc::string::String");
        assert_eq!(
            err.to_string(),
            "no handler accepts the active alternative 2 (`alloc::string::String`)"
        );
        assert_eq!(err.active(), 2);
    }
}
