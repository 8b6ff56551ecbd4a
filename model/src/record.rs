use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Row-type metadata: physical table name plus the ordered list of persisted
/// logical field names. Implementations are plain registrations — there is no
/// runtime reflection. An implementor with embedded or parent structs is
/// expected to splice their fields into `fields()` in order.
pub trait Record: 'static {
    fn table_name() -> &'static str;

    /// Ordered persisted field names, camelCase logical style. Synthetic
    /// members must not appear here.
    fn fields() -> Vec<&'static str>;
}

fn cache() -> &'static RwLock<HashMap<TypeId, Arc<[String]>>> {
    static CACHE: OnceLock<RwLock<HashMap<TypeId, Arc<[String]>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Memoized fields enumerator, keyed by type identity. A pure function of the
/// type: concurrent lookups are safe and a population race merely recomputes
/// the same value.
pub fn fields_of<R: Record>() -> Arc<[String]> {
    let key = TypeId::of::<R>();
    if let Ok(map) = cache().read() {
        if let Some(fields) = map.get(&key) {
            return Arc::clone(fields);
        }
    }
    let fields: Arc<[String]> = R::fields().into_iter().map(str::to_owned).collect();
    if let Ok(mut map) = cache().write() {
        return Arc::clone(map.entry(key).or_insert(fields));
    }
    fields
}
