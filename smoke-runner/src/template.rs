//! Probe URL construction

use crate::error::TemplateError;
use crate::probe::Probe;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;
use url::Url;

/// Build the full URL of `probe` below `base`
///
/// `{name}` placeholders in the path template are replaced by the probe's
/// params and each resulting segment is percent-encoded. Query parameters
/// are appended in declaration order, including empty ones. A path or query already
/// present on `base` is kept as a prefix and dropped respectively.
pub fn build_url(base: &Url, probe: &Probe) -> Result<Url, TemplateError> {
    let template = probe.path.as_str();
    let Some(relative) = template.strip_prefix('/') else {
        return Err(TemplateError::Relative {
            template: template.to_string(),
        });
    };

    let mut used = HashSet::new();
    let segments = relative
        .split('/')
        .map(|segment| render_segment(segment, template, &probe.params, &mut used))
        .collect::<Result<Vec<_>, _>>()?;

    for name in probe.params.keys() {
        if !used.contains(name.as_str()) {
            warn!("Probe '{}' sets unused path parameter '{}'", probe.name, name);
        }
    }

    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| TemplateError::InvalidBase {
                base: base.to_string(),
            })?;
        path.pop_if_empty();
        for segment in &segments {
            path.push(segment);
        }
    }

    url.set_query(None);
    url.set_fragment(None);
    if !probe.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &probe.query {
            pairs.append_pair(name, value);
        }
    }

    Ok(url)
}

fn render_segment<'a>(
    segment: &str,
    template: &str,
    params: &'a BTreeMap<String, String>,
    used: &mut HashSet<&'a str>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find(['{', '}']) {
        if rest[start..].starts_with('}') {
            return Err(TemplateError::Unmatched {
                template: template.to_string(),
            });
        }

        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| TemplateError::Unclosed {
            template: template.to_string(),
        })?;

        let name = &after[..end];
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder {
                template: template.to_string(),
            });
        }
        if name.contains('{') {
            return Err(TemplateError::Unclosed {
                template: template.to_string(),
            });
        }

        let (key, value) = params
            .get_key_value(name)
            .ok_or_else(|| TemplateError::MissingParam {
                name: name.to_string(),
            })?;
        used.insert(key.as_str());
        out.push_str(value);

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
