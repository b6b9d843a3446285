//! Health reporting shared by the store and cache clients.

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is switched off by configuration.
    Disabled,
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }

    /// Short label used in readiness responses.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "up",
            Self::Disabled => "disabled",
            Self::Unhealthy(_) => "down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(HealthStatus::Healthy.label(), "up");
        assert_eq!(HealthStatus::Disabled.label(), "disabled");
        assert_eq!(HealthStatus::Unhealthy("refused".into()).label(), "down");
        assert!(HealthStatus::Unhealthy("x".into()).is_unhealthy());
        assert!(!HealthStatus::Disabled.is_healthy());
    }
}
