use std::collections::BTreeMap;
use crate::domain::RenewalStep;

pub trait RenewalStrategy: Send + Sync {
    fn distro(&self) -> &'static str;

    fn plan(&self, sudo: bool) -> Vec<RenewalStep>;
}

pub struct K3sRestart;

impl RenewalStrategy for K3sRestart {
    fn distro(&self) -> &'static str { "k3s" }

    fn plan(&self, sudo: bool) -> Vec<RenewalStep> {
        vec![
            RenewalStep::new("Stop k3s server", "systemctl stop k3s.service").with_sudo(sudo),
            RenewalStep::new("Start k3s server", "systemctl start k3s.service").with_sudo(sudo),
        ]
    }
}

pub struct StrategyRegistry {
    strategies: BTreeMap<&'static str, Box<dyn RenewalStrategy>>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self { strategies: BTreeMap::new() }
    }

    pub fn with_defaults() -> Self {
        Self::empty().register(K3sRestart)
    }

    pub fn register<S: RenewalStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.insert(strategy.distro(), Box::new(strategy));
        self
    }

    pub fn get(&self, distro: &str) -> Option<&dyn RenewalStrategy> {
        self.strategies.get(distro).map(|s| s.as_ref())
    }

    pub fn supported(&self) -> Vec<&'static str> {
        self.strategies.keys().copied().collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self { Self::with_defaults() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k3s_plan_is_stop_then_start() {
        let commands: Vec<String> = K3sRestart.plan(false).into_iter().map(|s| s.command).collect();
        assert_eq!(commands, ["systemctl stop k3s.service", "systemctl start k3s.service"]);
        assert!(K3sRestart.plan(true).iter().all(|s| s.sudo));
    }

    #[test]
    fn defaults_only_know_k3s() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(registry.supported(), ["k3s"]);
        assert!(registry.get("k3s").is_some());
        assert!(registry.get("kubernetes").is_none());
        assert!(registry.get("rke2").is_none());
    }

    struct Rke2;

    impl RenewalStrategy for Rke2 {
        fn distro(&self) -> &'static str { "rke2" }
        fn plan(&self, _sudo: bool) -> Vec<RenewalStep> {
            vec![RenewalStep::new("Restart rke2", "systemctl restart rke2-server.service")]
        }
    }

    #[test]
    fn registry_extends_without_touching_lookup() {
        let registry = StrategyRegistry::with_defaults().register(Rke2);
        assert_eq!(registry.supported(), ["k3s", "rke2"]);
        assert_eq!(registry.get("rke2").unwrap().plan(false).len(), 1);
    }
}
