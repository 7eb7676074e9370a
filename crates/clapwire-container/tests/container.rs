//! Integration tests for container assembly.

use clapwire_container::{Components, Container, ContainerError, Module, Provider};
use std::sync::Arc;

#[derive(Debug)]
struct Settings {
    name: String,
}

#[derive(Debug)]
struct Banner(String);

#[derive(Debug, thiserror::Error)]
#[error("settings are invalid: {0}")]
struct SettingsError(String);

fn banner_provider() -> Provider {
    Provider::new("banner", |r| {
        let name = r
            .optional::<Settings>()?
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "anonymous".to_string());
        Ok(Components::new().with(Banner(format!("welcome, {name}"))))
    })
    .output::<Banner>()
}

// =============================================================================
// Optional dependencies
// =============================================================================

#[test]
fn test_optional_dependency_present() {
    let container = Container::builder()
        .supply(Settings {
            name: "ops".into(),
        })
        .provide(banner_provider())
        .build()
        .unwrap();

    assert_eq!(container.resolve::<Banner>().unwrap().0, "welcome, ops");
}

#[test]
fn test_optional_dependency_absent() {
    let container = Container::builder()
        .provide(banner_provider())
        .build()
        .unwrap();

    assert_eq!(container.resolve::<Banner>().unwrap().0, "welcome, anonymous");
}

// =============================================================================
// Module registration
// =============================================================================

#[test]
fn test_grouped_modules_register_in_order() {
    let module = Module::group([
        Module::supply(Settings {
            name: "grouped".into(),
        }),
        Module::provide(banner_provider()),
    ]);

    let container = Container::builder().module(module).build().unwrap();
    assert_eq!(container.len(), 2);
    assert!(container.provides::<Banner>());
    assert_eq!(container.resolve::<Banner>().unwrap().0, "welcome, grouped");
}

#[test]
fn test_module_error_reported_at_build() {
    let err = Container::builder()
        .module(Module::error(SettingsError("empty name".into())))
        .build()
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid module: settings are invalid: empty name");
    let source = err.downcast_source::<SettingsError>().unwrap();
    assert_eq!(source.0, "empty name");
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_provider_error_keeps_concrete_type() {
    let container = Container::builder()
        .provide(
            Provider::new("settings", |_| {
                Err(SettingsError("unreadable".into()).into())
            })
            .output::<Settings>(),
        )
        .provide(banner_provider())
        .build()
        .unwrap();

    // The banner provider sees the settings failure through its optional dependency.
    let err = container.resolve::<Banner>().unwrap_err();
    assert!(matches!(err, ContainerError::Provider { .. }));
    assert!(err.downcast_source::<SettingsError>().is_some());
}

#[test]
fn test_resolved_components_are_shared() {
    let container = Container::builder()
        .supply(Settings {
            name: "shared".into(),
        })
        .build()
        .unwrap();

    let a = container.resolve::<Settings>().unwrap();
    let b = container.resolve::<Settings>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
