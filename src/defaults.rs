//! Default values for taglib-resolver configuration.
//!
//! This module provides centralized default values and well-known resource
//! names used across the scanners, ensuring consistency and avoiding
//! duplication.

/// Default configuration file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILENAME: &str = ".taglib-resolver.yaml";

/// Resource path of the deployment descriptor inside the local namespace.
pub const WEB_XML: &str = "/WEB-INF/web.xml";

/// Root of the local resource namespace.
pub const WEB_INF: &str = "/WEB-INF/";

/// Namespace reserved for tag files; only implicit fragment descriptors may live here.
pub const WEB_INF_TAGS: &str = "/WEB-INF/tags/";

/// The single descriptor name allowed under [`WEB_INF_TAGS`].
pub const IMPLICIT_TLD: &str = "implicit.tld";

/// Descriptor file suffix.
pub const TLD_SUFFIX: &str = ".tld";

/// Archive file suffix.
pub const JAR_SUFFIX: &str = ".jar";

/// Namespace inside archives that holds descriptors.
pub const META_INF: &str = "META-INF/";

/// Well-known descriptor entry used for archives declared explicitly.
pub const DEFAULT_TLD_ENTRY: &str = "META-INF/taglib.tld";

/// Namespace and pattern used when asking a module graph for descriptors.
pub const MODULE_NAMESPACE: &str = "/META-INF";
pub const MODULE_PATTERN: &str = "*.tld";

/// Archives known not to contain any tag library descriptors.
///
/// Only consulted for shared providers; application-local archives are
/// always scanned.
pub const DEFAULT_NO_TLD_JARS: &[&str] = &[
    // Bootstrap
    "bootstrap.jar",
    "commons-daemon.jar",
    "tomcat-juli.jar",
    // Container
    "annotations-api.jar",
    "catalina.jar",
    "catalina-ant.jar",
    "catalina-ha.jar",
    "catalina-tribes.jar",
    "el-api.jar",
    "jasper.jar",
    "jasper-el.jar",
    "jasper-jdt.jar",
    "jsp-api.jar",
    "servlet-api.jar",
    "tomcat-coyote.jar",
    "tomcat-dbcp.jar",
    // i18n
    "tomcat-i18n-en.jar",
    "tomcat-i18n-es.jar",
    "tomcat-i18n-fr.jar",
    "tomcat-i18n-ja.jar",
    // Misc third-party
    "ant.jar",
    "commons-dbcp.jar",
    "commons-beanutils.jar",
    "commons-fileupload-1.0.jar",
    "commons-pool.jar",
    "commons-digester.jar",
    "commons-logging.jar",
    "commons-collections.jar",
    "jmx.jar",
    "jmx-tools.jar",
    "xercesImpl.jar",
    "xmlParserAPIs.jar",
    "xml-apis.jar",
    // Runtime
    "sunjce_provider.jar",
    "ldapsec.jar",
    "localedata.jar",
    "dnsns.jar",
    "tools.jar",
    "sunpkcs11.jar",
];
