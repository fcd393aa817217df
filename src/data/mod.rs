/// Data layer: text access, table loading, scalar transforms.
///
/// Architecture:
/// ```text
///  .arr / .txt / .csv
///        │
///        ▼
///   ┌──────────┐
///   │   text    │  read file → SourceFile (path + lines)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rows = lines, cols = tokens on line 1,
///   └──────────┘  fill row-major, reject any other row width
///        │
///        ▼
///   ┌──────────┐
///   │  Table<T> │  Vec<T>, rows × cols, byte size
///   └──────────┘
///        │
///        ├──▶ ops   scalar + - * / on float tables
///        └──▶ sink  raw bytes + stride to a binary consumer
/// ```

pub mod loader;
pub mod model;
pub mod ops;
pub mod sink;
pub mod text;
