/// Request scoped flags that let one hook steer the ones after it.
///
/// A fresh, all-false context is created for every request. Hooks receive it
/// by value and hand back the context the next hook should see.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Context {
    /// Leave the swarm untouched, e.g. for dry-run announces.
    pub skip_swarm_interaction: bool,
    /// Leave the response untouched.
    pub skip_response: bool,
    /// The scrape arrived over IPv6.
    pub scrape_is_ipv6: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_swarm_interaction(self) -> Self {
        Self {
            skip_swarm_interaction: true,
            ..self
        }
    }

    pub fn with_skip_response(self) -> Self {
        Self {
            skip_response: true,
            ..self
        }
    }

    pub fn with_scrape_is_ipv6(self) -> Self {
        Self {
            scrape_is_ipv6: true,
            ..self
        }
    }
}
