//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Collapse ids and slugs so one route maps to one span name and metric label.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if previous == "products" && index == 1 {
            normalised.push_str("{slug}");
        } else if segment.parse::<i64>().is_ok() {
            normalised.push_str("{id}");
        } else if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_slugs_collapse() {
        let names = request_span_name("GET", "/products/blue-mug");

        assert_eq!(names.otel_path, "/products/{slug}");
        assert_eq!(names.otel_span_name, "GET /products/{slug}");
    }

    #[test]
    fn cart_product_ids_collapse() {
        assert_eq!(normalise_path_for_span_name("/cart/42"), "/cart/{id}");
        assert_eq!(normalise_path_for_span_name("/cart/checkout"), "/cart/checkout");
    }

    #[test]
    fn root_and_static_paths_are_unchanged() {
        assert_eq!(normalise_path_for_span_name("/"), "/");
        assert_eq!(normalise_path_for_span_name("/healthcheck"), "/healthcheck");
    }
}
