//! SIP trunk setup use case

use crate::domain::dispatch::{parse_trunk_id, TrunkProvisioner};
use crate::domain::shared::error::{DomainError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub struct TrunkService {
    provisioner: Arc<dyn TrunkProvisioner>,
    timeout: Duration,
}

impl TrunkService {
    pub fn new(provisioner: Arc<dyn TrunkProvisioner>, timeout: Duration) -> Self {
        Self {
            provisioner,
            timeout,
        }
    }

    /// Run the trunk setup tool; the trunk id is `None` when it printed none
    pub async fn setup(&self) -> Result<Option<String>> {
        let output = match tokio::time::timeout(self.timeout, self.provisioner.setup_trunk()).await {
            Ok(Ok(output)) => output,
            Ok(Err(failure)) => {
                error!("Trunk setup failed: {}", failure);
                return Err(DomainError::Adapter {
                    message: "Error configuring trunk".to_string(),
                    details: failure.details(),
                });
            }
            Err(_) => {
                return Err(DomainError::Timeout {
                    details: format!(
                        "Trunk setup did not finish within {} seconds",
                        self.timeout.as_secs_f64()
                    ),
                })
            }
        };

        let trunk_id = parse_trunk_id(&output);
        info!("Trunk configured: {:?}", trunk_id);
        Ok(trunk_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dispatch::adapter::MockTrunkProvisioner;
    use crate::domain::dispatch::AdapterFailure;

    #[tokio::test]
    async fn test_trunk_id_extracted() {
        let mut provisioner = MockTrunkProvisioner::new();
        provisioner
            .expect_setup_trunk()
            .times(1)
            .returning(|| Ok("Outbound SIP trunk created: ID = ST_abc\n".to_string()));

        let service = TrunkService::new(Arc::new(provisioner), Duration::from_secs(5));

        let trunk_id = tokio_test::assert_ok!(service.setup().await);
        assert_eq!(trunk_id, Some("ST_abc".to_string()));
    }

    #[tokio::test]
    async fn test_trunk_failure() {
        let mut provisioner = MockTrunkProvisioner::new();
        provisioner.expect_setup_trunk().returning(|| {
            Err(AdapterFailure::Exit {
                code: Some(2),
                output: "missing TWILIO_ACCOUNT_SID".to_string(),
            })
        });

        let service = TrunkService::new(Arc::new(provisioner), Duration::from_secs(5));
        let err = tokio_test::assert_err!(service.setup().await);

        assert_eq!(err.details(), Some("missing TWILIO_ACCOUNT_SID"));
    }
}
