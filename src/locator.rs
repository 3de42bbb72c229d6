use crate::{schema::Variant, util::zero_pad};

/// URL of the dex page for `id`. A `name` is only honoured by variants that
/// have name-keyed pages; the others fall back to the identifier.
pub fn build_url(base: &str, id: u16, variant: Variant, name: Option<&str>) -> String {
    let base = base.trim_end_matches('/');
    let prefix = variant.path_prefix();
    match name {
        Some(name) if variant.supports_name() => {
            let slug = name
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect::<String>();
            format!("{base}/{prefix}/{slug}/")
        }
        _ => format!("{base}/{prefix}/{}.shtml", zero_pad(id)),
    }
}
