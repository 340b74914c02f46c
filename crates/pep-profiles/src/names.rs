//! Well-known attribute, obligation, and datatype URI constants used by the
//! two built-in profile adapters.

pub const DATATYPE_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const DATATYPE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const DATATYPE_ANYURI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

pub const SUBJECT_KEY_INFO: &str = "urn:oasis:names:tc:xacml:1.0:subject:key-info";

pub const AUTHZINTEROP_SUBJECT_CERTCHAIN: &str = "http://authz-interop.org/xacml/subject/cert-chain";
pub const AUTHZINTEROP_SUBJECT_VOMS_FQAN: &str = "http://authz-interop.org/xacml/subject/voms-fqan";
pub const AUTHZINTEROP_SUBJECT_VOMS_PRIMARY_FQAN: &str =
    "http://authz-interop.org/xacml/subject/voms-primary-fqan";

pub const AUTHZINTEROP_OBLIGATION_UIDGID: &str = "http://authz-interop.org/xacml/obligation/uidgid";
pub const AUTHZINTEROP_OBLIGATION_SECONDARY_GIDS: &str =
    "http://authz-interop.org/xacml/obligation/secondary-gids";
pub const AUTHZINTEROP_OBLIGATION_USERNAME: &str = "http://authz-interop.org/xacml/obligation/username";
pub const AUTHZINTEROP_OBLIGATION_ATTR_POSIX_UID: &str =
    "http://authz-interop.org/xacml/attribute/posix-uid";
pub const AUTHZINTEROP_OBLIGATION_ATTR_POSIX_GID: &str =
    "http://authz-interop.org/xacml/attribute/posix-gid";
pub const AUTHZINTEROP_OBLIGATION_ATTR_USERNAME: &str =
    "http://authz-interop.org/xacml/attribute/username";

pub const GRIDWN_PROFILE_VERSION: &str = "http://glite.org/xacml/profile/grid-wn/1.0";
pub const GRIDWN_ATTRIBUTE_PROFILE_ID: &str = "http://glite.org/xacml/attribute/profile-id";
pub const GRIDWN_ATTRIBUTE_FQAN: &str = "http://glite.org/xacml/attribute/fqan";
pub const GRIDWN_ATTRIBUTE_FQAN_PRIMARY: &str = "http://glite.org/xacml/attribute/fqan/primary";
pub const GRIDWN_ATTRIBUTE_USER_ID: &str = "http://glite.org/xacml/attribute/user-id";
pub const GRIDWN_ATTRIBUTE_GROUP_ID: &str = "http://glite.org/xacml/attribute/group-id";
pub const GRIDWN_ATTRIBUTE_GROUP_ID_PRIMARY: &str = "http://glite.org/xacml/attribute/group-id/primary";
pub const GRIDWN_DATATYPE_FQAN: &str = "http://glite.org/xacml/datatype/fqan";
pub const GRIDWN_OBLIGATION_LOCAL_ENVIRONMENT_MAP_POSIX: &str =
    "http://glite.org/xacml/obligation/local-environment-map/posix";
