//! Projection of a host record onto what the viewer displays.
//!
//! Pages store their images differently (tuples from the gallery endpoint,
//! objects from a generation response, a single upscaled result). A
//! [`Projection`] tells the viewer how to read the URL, the caption and the
//! subtitle fields out of whatever record type the page uses.

use std::fmt;
use std::rc::Rc;

type Getter<T> = Rc<dyn Fn(&T) -> String>;
type OptionalGetter<T> = Rc<dyn Fn(&T) -> Option<String>>;

struct Field<T> {
    label: Option<String>,
    get: OptionalGetter<T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            get: Rc::clone(&self.get),
        }
    }
}

/// How to read a record of type `T`.
pub struct Projection<T> {
    url: Getter<T>,
    caption: Getter<T>,
    fields: Vec<Field<T>>,
}

impl<T> Clone for Projection<T> {
    fn clone(&self) -> Self {
        Self {
            url: Rc::clone(&self.url),
            caption: Rc::clone(&self.caption),
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for Projection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self
            .fields
            .iter()
            .map(|field| field.label.as_deref().unwrap_or("-"))
            .collect();
        f.debug_struct("Projection").field("fields", &labels).finish()
    }
}

impl<T> Projection<T> {
    pub fn new<U, C>(url: U, caption: C) -> Self
    where
        U: Fn(&T) -> String + 'static,
        C: Fn(&T) -> String + 'static,
    {
        Self {
            url: Rc::new(url),
            caption: Rc::new(caption),
            fields: Vec::new(),
        }
    }

    /// Add a `Label: value` subtitle field. Records where `get` returns `None`
    /// skip the field.
    pub fn field<F>(mut self, label: impl Into<String>, get: F) -> Self
    where
        F: Fn(&T) -> Option<String> + 'static,
    {
        self.fields.push(Field {
            label: Some(label.into()),
            get: Rc::new(get),
        });
        self
    }

    /// Add a subtitle field shown as the bare value.
    pub fn plain_field<F>(mut self, get: F) -> Self
    where
        F: Fn(&T) -> Option<String> + 'static,
    {
        self.fields.push(Field {
            label: None,
            get: Rc::new(get),
        });
        self
    }

    pub fn url(&self, record: &T) -> String {
        (self.url)(record)
    }

    pub fn caption(&self, record: &T) -> String {
        (self.caption)(record)
    }

    /// Subtitle entries in declaration order.
    pub fn fields(&self, record: &T) -> Vec<(Option<String>, String)> {
        self.fields
            .iter()
            .filter_map(|field| (field.get)(record).map(|value| (field.label.clone(), value)))
            .collect()
    }

    /// Subtitle line, e.g. `Style: anime | Seed: 42 | Created: 01/02/2025 10:00:00`.
    pub fn subtitle(&self, record: &T) -> String {
        self.fields(record)
            .into_iter()
            .map(|(label, value)| match label {
                Some(label) => format!("{label}: {value}"),
                None => value,
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upscaled {
        src: String,
        resolution: String,
        original: Option<String>,
    }

    fn projection() -> Projection<Upscaled> {
        Projection::new(
            |r: &Upscaled| r.src.clone(),
            |_: &Upscaled| "Upscaled Image".to_string(),
        )
            .field("Original Size", |r| r.original.clone())
            .field("Upscaled Size", |r| Some(r.resolution.clone()))
    }

    #[test]
    fn test_reads_url_and_caption() {
        let record = Upscaled {
            src: "blob:abc".into(),
            resolution: "2048x2048".into(),
            original: Some("512x512".into()),
        };
        let p = projection();
        assert_eq!(p.url(&record), "blob:abc");
        assert_eq!(p.caption(&record), "Upscaled Image");
        assert_eq!(
            p.subtitle(&record),
            "Original Size: 512x512 | Upscaled Size: 2048x2048"
        );
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let record = Upscaled {
            src: "a".into(),
            resolution: "2048x2048".into(),
            original: None,
        };
        assert_eq!(projection().subtitle(&record), "Upscaled Size: 2048x2048");
    }

    #[test]
    fn test_plain_fields() {
        let p = Projection::new(
            |s: &(String, String)| s.0.clone(),
            |s: &(String, String)| s.1.clone(),
        )
            .plain_field(|_| Some("anime".to_string()))
            .field("Created", |_| Some("today".to_string()));
        let record = ("u".to_string(), "c".to_string());
        assert_eq!(p.subtitle(&record), "anime | Created: today");
        assert_eq!(p.clone().fields(&record).len(), 2);
    }
}
