/// Endpoint templates for the tenant's HTTP interface
///
/// Paths are relative to the tenant URL. `{name}` marks a placeholder that
/// must be supplied when the template is resolved.
pub mod api {
    /// Login entry page (start of the handshake)
    pub const AUTHENTICATE: &str = "/dwaas-ui/index.html";

    /// Identity record of the logged-in user (user + tenant)
    pub const LOGON: &str = "/sap/fpa/services/rest/epm/session?action=logon";

    /// Inventory of all workspaces in the tenant
    pub const SPACES: &str = "/dwaas-core/repository/spaces";

    /// Storage/memory consumption keyed by workspace name
    pub const SPACES_RESOURCES: &str = "/dwaas-core/resources/spaces";

    /// Full workspace definition
    pub const SPACE: &str = "/dwaas-core/api/v1/content?space={space_name}&spaceDefinition=true";

    /// Share create endpoint
    pub const SHARES: &str = "/dwaas-core/repository/shares";

    /// Shares of the given objects in a workspace
    pub const SHARE_LIST: &str =
        "/dwaas-core/repository/shares?spaceName={space_name}&objectNames={object_names}";

    /// Connections of a workspace (keyed by workspace id)
    pub const CONNECTIONS: &str =
        "/dwaas-core/repository/remotes?space_ids={space_id}&inSpaceManagement=true&details=";

    /// Connection create endpoint
    pub const CONNECTION: &str =
        "/dwaas-core/repository/remotes/?space_ids={space_id}&inSpaceManagement=true";

    /// Connection delete endpoint
    pub const CONNECTION_DELETE: &str =
        "/dwaas-core/repository/remotes/{connection_id}?space_ids={space_id}";

    /// Remote tables monitor of a workspace
    pub const REMOTE_TABLES: &str = "/dwaas-core/monitor/{space_name}/remoteTables";

    /// Business builder content loader
    pub const BUSINESS_BUILDER: &str = "/dwaas-core/c4s/internal_services/loadContent";

    /// User inventory for the tenant
    pub const USERS: &str = "/sap/fpa/services/rest/epm/security/list/users?detail=true&parameter=key_value&includePending=true&forceLicensingCheck=true&tenant={tenant_id}";

    /// Data builder search (OData); the filter is built per query
    pub const SEARCH: &str = "/dwaas-core/repository/search/$all";

    /// Schema browser for data access users
    pub const DATASOURCE_CHILDREN: &str = "/dwaas-core/datasources/getchildren";

    /// Page size used for OData search queries
    pub const SEARCH_TOP: u32 = 99999;
}

/// Browser impersonation for the login handshake
pub mod browser {
    /// User agent sent on every request
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:63.0) Gecko/20100101 Firefox/63.0";

    /// Cookie the tenant expects after login (route fragment)
    pub const FRAGMENT_AFTER_LOGIN: &str = "%23%2Fadministration%26%2Fadm%2Fonpremise";

    /// Cookie the tenant expects after login (landing page)
    pub const LOCATION_AFTER_LOGIN: &str = "%2Fdwaas-ui%2Findex.html";

    /// Value of the `utf8` form field posted by the login forms
    pub const UTF8_CHECK: &str = "&#x2713;";
}

/// Persisted settings file
pub mod settings {
    /// Directory name under the home directory
    pub const DIR_NAME: &str = ".dwcctl";

    /// Settings file name
    pub const FILE_NAME: &str = "config.json";

    /// Environment variable overriding the settings file path
    pub const ENV_VAR: &str = "DWCCTL_CONFIG";

    /// Working directory (under the settings dir) for definition files
    pub const WORK_DIR: &str = "working";
}

/// Workspace identifier and label rules
pub mod validation {
    /// Maximum length of a workspace technical name
    pub const MAX_SPACE_ID_LEN: usize = 20;

    /// Maximum length of a workspace label
    pub const MAX_SPACE_LABEL_LEN: usize = 30;

    /// Prefixes a workspace technical name may not start with
    pub const RESERVED_PREFIXES: &[&str] = &["_SYS", "DWC_", "SAP_"];

    /// Names a workspace may not have
    pub const RESERVED_WORDS: &[&str] = &[
        "SYS",
        "PUBLIC",
        "CREATE",
        "SYSTEM",
        "DBADMIN",
        "PAL_STEM_TFIDF",
        "SAP_PA_APL",
        "DWC_USER_OWNER",
        "DWC_TENANT_OWNER",
        "DWC_AUDIT_READER",
        "DWC_GLOBAL",
        "DWC_GLOBAL_LOG",
    ];
}

/// Workspace quota defaults
pub mod quota {
    /// Multiplier applied to operator-supplied disk/memory values
    pub const UNIT: u64 = 1_000_000_000;

    /// Default assigned storage
    pub const DEFAULT_STORAGE: u64 = UNIT;

    /// Default assigned memory
    pub const DEFAULT_MEMORY: u64 = UNIT / 2;

    /// Default workspace priority
    pub const DEFAULT_PRIORITY: u32 = 5;

    /// Convert an operator quota (in units) into base units
    pub fn to_base_units(units: f64) -> u64 {
        (units * UNIT as f64) as u64
    }
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Default external command-line utility
    pub const CLI_BINARY: &str = "dwc";

    /// Header lines skipped in bulk CSV files
    pub const BULK_SKIP: usize = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_paths_are_relative() {
        for path in [
            api::AUTHENTICATE,
            api::LOGON,
            api::SPACES,
            api::SPACE,
            api::USERS,
            api::CONNECTIONS,
        ] {
            assert!(path.starts_with('/'), "{} should start with '/'", path);
        }
    }

    #[test]
    fn test_quota_conversion() {
        assert_eq!(quota::to_base_units(1.0), 1_000_000_000);
        assert_eq!(quota::to_base_units(0.5), 500_000_000);
        assert_eq!(quota::to_base_units(2.25), 2_250_000_000);
        assert_eq!(quota::DEFAULT_MEMORY, 500_000_000);
    }

    #[test]
    fn test_reserved_prefixes_are_four_chars() {
        assert!(validation::RESERVED_PREFIXES.iter().all(|p| p.len() == 4));
    }
}
