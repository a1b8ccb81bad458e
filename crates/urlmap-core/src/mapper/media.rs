//! Image descriptor and responsive srcset bindings.

use std::collections::BTreeMap;

use crate::store::OptionStore;

use super::UrlMapper;

/// Image descriptor handed out for an attachment: URL, dimensions, and
/// whether it is a resized intermediate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSrc {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub is_intermediate: bool,
}

/// One responsive image candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SrcsetSource {
    pub url: String,
    /// `w` or `x`.
    pub descriptor: String,
    /// Width in pixels for `w`, pixel density (e.g. `1.5`) for `x`.
    pub value: f32,
}

/// Candidates keyed by width.
pub type Srcset = BTreeMap<u32, SrcsetSource>;

impl<S: OptionStore> UrlMapper<S> {
    /// Rewrites only the URL of an image descriptor.
    pub fn rewrite_image_src(&self, image: ImageSrc) -> ImageSrc {
        ImageSrc {
            url: self.rewrite_url(&image.url),
            ..image
        }
    }

    /// Rewrites the `url` of every srcset candidate.
    pub fn rewrite_srcset(&self, mut sources: Srcset) -> Srcset {
        let pairs = self.replacement_pairs();
        if pairs.is_empty() {
            return sources;
        }
        for source in sources.values_mut() {
            source.url = crate::rewrite::apply_pairs(&source.url, &pairs);
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{mapper_with, uploads_2023};
    use super::*;

    #[test]
    fn image_src_only_url_changes() {
        let mapper = mapper_with(&[uploads_2023()]);
        let image = ImageSrc {
            url: "https://site.example/wp-content/uploads/2023/a-300x200.jpg".to_string(),
            width: 300,
            height: 200,
            is_intermediate: true,
        };
        let out = mapper.rewrite_image_src(image.clone());
        assert_eq!(
            out.url,
            "https://cdn.example.com/bucket/wp-content/uploads/2023/a-300x200.jpg"
        );
        assert_eq!((out.width, out.height, out.is_intermediate), (300, 200, true));
    }

    #[test]
    fn srcset_urls_rewritten_descriptors_kept() {
        let mapper = mapper_with(&[uploads_2023()]);
        let mut sources = Srcset::new();
        for width in [300, 1024] {
            sources.insert(
                width,
                SrcsetSource {
                    url: format!("http://site.example/wp-content/uploads/2023/a-{width}.jpg"),
                    descriptor: "w".to_string(),
                    value: width as f32,
                },
            );
        }

        let out = mapper.rewrite_srcset(sources);
        assert_eq!(
            out[&300].url,
            "https://cdn.example.com/bucket/wp-content/uploads/2023/a-300.jpg"
        );
        assert_eq!(
            out[&1024].url,
            "https://cdn.example.com/bucket/wp-content/uploads/2023/a-1024.jpg"
        );
        assert_eq!(out[&1024].descriptor, "w");
        assert_eq!(out[&1024].value, 1024.0);
    }

    #[test]
    fn image_src_untouched_without_mappings() {
        let mapper = mapper_with(&[]);
        let image = ImageSrc {
            url: "https://site.example/wp-content/uploads/2023/a.jpg".to_string(),
            width: 1024,
            height: 768,
            is_intermediate: false,
        };
        assert_eq!(mapper.rewrite_image_src(image.clone()), image);
    }

    #[test]
    fn density_descriptors_keep_fractional_values() {
        let mapper = mapper_with(&[uploads_2023()]);
        let mut sources = Srcset::new();
        sources.insert(
            1536,
            SrcsetSource {
                url: "/wp-content/uploads/2023/a@1.5x.jpg".to_string(),
                descriptor: "x".to_string(),
                value: 1.5,
            },
        );
        let out = mapper.rewrite_srcset(sources);
        assert_eq!(
            out[&1536].url,
            "https://cdn.example.com/bucket/wp-content/uploads/2023/a@1.5x.jpg"
        );
        assert_eq!((out[&1536].descriptor.as_str(), out[&1536].value), ("x", 1.5));
    }

    #[test]
    fn srcset_untouched_without_mappings() {
        let mapper = mapper_with(&[]);
        let mut sources = Srcset::new();
        sources.insert(
            300,
            SrcsetSource {
                url: "/wp-content/uploads/2023/a.jpg".to_string(),
                descriptor: "w".to_string(),
                value: 300.0,
            },
        );
        assert_eq!(mapper.rewrite_srcset(sources.clone()), sources);
    }
}
