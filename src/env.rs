use std::collections::BTreeMap;

use crate::error::LayerfigError;
use crate::merge::Layer;
use crate::schema::Schema;
use crate::types::ConfigSource;

/// Build a layer from environment variables, using the schema's env table.
///
/// Only variables named by a field's `env` are consulted, in schema order,
/// so unrelated variables never influence the result. A variable that is set
/// always applies, even when empty: `PORT=` is a type error and `DEBUG=` is
/// `false`. If `vars` repeats a name, the last value wins.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_layer(
    schema: &Schema,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<Layer, LayerfigError> {
    let vars: BTreeMap<String, String> = vars.into_iter().collect();
    let mut layer = Layer::new();

    for field in schema.fields() {
        let Some(name) = &field.env else {
            continue;
        };
        let Some(raw) = vars.get(name) else {
            continue;
        };
        let value = field
            .kind
            .coerce_str(&field.key, raw, ConfigSource::Environment)?;
        layer.insert(field.key.clone(), value);
    }

    Ok(layer)
}
