use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// Assigns the next sequential client identifier, used only in log lines
/// (the `client.id` tracing field) to disambiguate concurrent handles in a
/// multi-threaded host.
pub(crate) fn next_client_id() -> u64 {
    NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The library name, version, and transport stack, used as both the
/// `User-Agent` header and the value returned to callers who want to log
/// which build they are running.
#[must_use]
pub fn version() -> String {
    format!("pep-client/{} (reqwest; rustls)", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_names_library_and_transport() {
        let v = version();
        assert!(v.starts_with("pep-client/"));
        assert!(v.contains("reqwest"));
        assert!(v.contains("rustls"));
    }

    #[test]
    fn client_ids_are_sequential_and_unique() {
        let a = next_client_id();
        let b = next_client_id();
        assert!(b > a);
    }
}
