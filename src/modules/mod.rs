//! Module registry — named extensions loaded at startup.
//!
//! A module contributes routes to the running app and/or markup to the app
//! shell head. Configured names resolve to implementations here, in config
//! order; unknown names fail startup so a typo never silently drops a module.

pub mod tailwind;

use std::collections::HashSet;

use axum::Router;

use crate::error::AppError;

/// A named extension registered at startup.
pub trait AppModule: Send + Sync {
    /// Stable identifier used in config and devtools output.
    fn name(&self) -> &'static str;

    /// Stateless routes contributed to the app. Merged after the core routes.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// HTML injected into the app shell `<head>`.
    fn head_html(&self) -> Option<&'static str> {
        None
    }
}

/// Resolve configured module names, preserving config order.
pub fn build_registry(names: &[String]) -> Result<Vec<Box<dyn AppModule>>, AppError> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            if !seen.insert(name.as_str()) {
                return Err(AppError::Config(format!("module listed twice: {name}")));
            }
            match name.as_str() {
                tailwind::MODULE_NAME => {
                    Ok(Box::new(tailwind::TailwindModule) as Box<dyn AppModule>)
                }
                other => Err(AppError::Config(format!("unknown module: {other}"))),
            }
        })
        .collect()
}

/// Concatenated head contributions, one line per contributing module.
pub fn head_html(modules: &[Box<dyn AppModule>]) -> String {
    modules
        .iter()
        .filter_map(|m| m.head_html())
        .map(|html| format!("  {html}\n"))
        .collect()
}

/// Registered module names, in registration order.
pub fn names(modules: &[Box<dyn AppModule>]) -> Vec<String> {
    modules.iter().map(|m| m.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry() {
        let modules = build_registry(&[]).unwrap();
        assert!(modules.is_empty());
        assert!(head_html(&modules).is_empty());
    }

    #[test]
    fn tailwind_resolves() {
        let modules = build_registry(&["tailwind".to_string()]).unwrap();
        assert_eq!(names(&modules), vec!["tailwind"]);
        assert!(head_html(&modules).contains("utilities.css"));
    }

    #[test]
    fn unknown_module_errors() {
        let err = build_registry(&["sitemap".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unknown module"));
        assert!(err.to_string().contains("sitemap"));
    }

    #[test]
    fn duplicate_module_errors() {
        let names: Vec<String> = vec!["tailwind".into(), "tailwind".into()];
        let err = build_registry(&names).unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }
}
