use rulesync_common::{RuleEntity, SyncRule};

use crate::error::SyncError;

/// The running instance a rule view belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineTarget {
    pub app: String,
    pub ip: String,
    pub port: u16,
}

impl MachineTarget {
    pub fn new(app: impl Into<String>, ip: impl Into<String>, port: u16) -> Self {
        Self {
            app: app.into(),
            ip: ip.into(),
            port,
        }
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if self.app.trim().is_empty() {
            return Err(SyncError::invalid("Bad app name"));
        }
        if self.ip.trim().is_empty() {
            return Err(SyncError::invalid("Bad machine IP"));
        }
        if self.port == 0 {
            return Err(SyncError::invalid("Bad machine port"));
        }
        Ok(())
    }

    pub fn entity<R: SyncRule>(&self, rule: R) -> RuleEntity<R> {
        RuleEntity::from_rule(self.app.clone(), self.ip.clone(), self.port, rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesync_common::rules::SystemRule;

    #[test]
    fn valid_target() {
        assert!(MachineTarget::new("order-svc", "10.0.0.1", 8719).validate().is_ok());
    }

    #[test]
    fn blank_fields_rejected() {
        let err = MachineTarget::new(" ", "10.0.0.1", 8719).validate().unwrap_err();
        assert!(err.to_string().contains("app"));
        let err = MachineTarget::new("svc", "", 8719).validate().unwrap_err();
        assert!(err.to_string().contains("IP"));
        let err = MachineTarget::new("svc", "10.0.0.1", 0).validate().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn entity_carries_target() {
        let target = MachineTarget::new("svc", "10.0.0.1", 8719);
        let entity = target.entity(SystemRule::default());
        assert_eq!(entity.app, "svc");
        assert_eq!(entity.ip, "10.0.0.1");
        assert_eq!(entity.port, 8719);
    }
}
