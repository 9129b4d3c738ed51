//! User-agent selection
//!
//! Selection is a pure function of the pool and the RNG handed in; nothing
//! here keeps process-wide state.

use crate::infrastructure::config::defaults;

/// Pool of user-agent strings to pick from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Pool from configured strings; blank entries are ignored
    pub fn new<I, S>(agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            agents: agents
                .into_iter()
                .map(Into::into)
                .filter(|agent: &String| !agent.trim().is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Pick one agent; an empty pool falls back to the first built-in agent
    pub fn pick<'a>(&'a self, rng: &mut fastrand::Rng) -> &'a str {
        if self.agents.is_empty() {
            return defaults::USER_AGENTS[0];
        }
        &self.agents[rng.usize(..self.agents.len())]
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new(defaults::USER_AGENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let pool = UserAgentPool::default();
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);

        let first: Vec<_> = (0..10).map(|_| pool.pick(&mut a).to_string()).collect();
        let second: Vec<_> = (0..10).map(|_| pool.pick(&mut b).to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let pool = UserAgentPool::new(["agent-a", "agent-b"]);
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..20 {
            assert!(["agent-a", "agent-b"].contains(&pool.pick(&mut rng)));
        }
    }

    #[test]
    fn test_blank_entries_dropped_and_empty_pool_falls_back() {
        let pool = UserAgentPool::new(["", "   "]);
        assert!(pool.is_empty());
        let mut rng = fastrand::Rng::with_seed(3);
        assert_eq!(pool.pick(&mut rng), defaults::USER_AGENTS[0]);
    }
}
