//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require both base URLs and check they are absolute http(s) URLs
//! - Check path templates carry the placeholders their routes need
//! - Validate value ranges (body limit > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is not an absolute http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must contain the {placeholder} placeholder")]
    MissingPlaceholder {
        field: &'static str,
        placeholder: &'static str,
    },

    #[error("listener.bind_address is not a socket address: {0}")]
    InvalidBindAddress(String),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(
        "listener.internal_base_url",
        &config.listener.internal_base_url,
        &mut errors,
    );
    check_url("upstream.base_url", &config.upstream.base_url, &mut errors);

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let paths = &config.upstream.paths;
    let templates: [(&'static str, &str, &[&'static str]); 4] = [
        ("upstream.paths.create_job", &paths.create_job, &["{org_id}"]),
        ("upstream.paths.update_job", &paths.update_job, &["{org_id}", "{job_id}"]),
        ("upstream.paths.list_jobs", &paths.list_jobs, &["{org_id}"]),
        ("upstream.paths.add_member", &paths.add_member, &[]),
    ];
    for (field, template, placeholders) in templates {
        if template.trim().is_empty() {
            errors.push(ValidationError::Missing { field });
            continue;
        }
        for &placeholder in placeholders {
            if !template.contains(placeholder) {
                errors.push(ValidationError::MissingPlaceholder { field, placeholder });
            }
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Missing { field });
        return;
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}
