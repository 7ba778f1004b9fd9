//! Configuration section definitions.
//!
//! Each module corresponds to a section in `corpus-frontend.toml`:
//!
//! | Module   | TOML Section | Purpose                                  |
//! |----------|--------------|------------------------------------------|
//! | `admin`  | `[admin]`    | Deployment admin properties file         |
//! | `corpus` | `[corpus]`   | Default corpus selection and aliases     |
//! | `paths`  | `[paths]`    | Web application directory layout         |
//! | `serve`  | `[serve]`    | HTTP server and context path             |

mod admin;
mod corpus;
mod paths;
mod serve;

pub use admin::AdminConfig;
pub use corpus::CorpusSection;
pub use paths::PathsConfig;
pub use serve::ServeConfig;
