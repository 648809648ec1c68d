//! Domain layer health check functionality

use std::collections::HashMap;

use crate::services::ReadingServiceTrait;

/// System health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// At least one component is not functioning
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is not functioning
    Unhealthy,
}

impl ComponentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentStatus::Healthy => "healthy",
            ComponentStatus::Unhealthy => "unhealthy",
        }
    }
}

/// A health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

/// The overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Component name to its health
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == SystemStatus::Healthy
    }
}

/// Probe the reading store and summarise the result
pub async fn get_system_health<S>(service: &S) -> SystemHealth
where
    S: ReadingServiceTrait + ?Sized,
{
    let storage = match service.storage_status().await {
        Ok(()) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e.to_string()),
        },
    };

    let status = if storage.status == ComponentStatus::Healthy {
        SystemStatus::Healthy
    } else {
        SystemStatus::Unhealthy
    };

    SystemHealth {
        status,
        components: vec![("storage".to_string(), storage)].into_iter().collect(),
    }
}
