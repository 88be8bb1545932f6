/// Data layer: core types, loading, and the derived views.
///
/// Architecture:
/// ```text
///  datos_de_entrada.csv  (';'-separated, ISO-8859-1, decimal commas)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + normalize → WasteDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ WasteDataset │  Vec<WasteRecord>, selector indices, read-only
///   └─────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  pure (records, filters) → derived view
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
