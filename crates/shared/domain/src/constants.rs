//! Shared string constants: `OpenAPI` tags, catalog defaults and session roles.

/// `OpenAPI` tag for platform endpoints (health, diagnostics).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the option catalog endpoints.
pub const CATALOG_TAG: &str = "Catalog";

/// Category that receives equipment names added through the catalog.
pub const GENERAL_EQUIPMENT_CATEGORY: &str = "General";

/// Session role granting access to the admin dashboard operations.
pub const ADMIN_ROLE: &str = "admin";
