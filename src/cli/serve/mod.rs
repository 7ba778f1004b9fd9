//! HTTP server: static assets first, everything else through the
//! [`Frontend`].

mod lifecycle;
mod response;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tiny_http::{Method, Request, Server};

use crate::config::FrontendConfig;
use crate::frontend::Frontend;
use crate::handler::RequestInfo;
use crate::utils::path::resolve_under;
use crate::{debug, log};

/// Largest url-encoded form body accepted on POST.
const MAX_FORM_BYTES: u64 = 1024 * 1024;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    workers: usize,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &FrontendConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    crate::core::register_server(Arc::clone(&server));

    log!("serve"; "http://{}{}", addr, config.context_path());

    Ok(BoundServer {
        server,
        workers: config.serve.workers,
    })
}

impl BoundServer {
    /// Start the request loop (blocking).
    pub fn run(self, frontend: Arc<Frontend>) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .context("failed to create request worker pool")?;

        for request in self.server.incoming_requests() {
            let frontend = Arc::clone(&frontend);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &frontend) {
                    log!("serve"; "request error: {e}");
                }
            });
        }

        log!("serve"; "stopped");
        Ok(())
    }
}

/// Run startup checks, bind and serve until Ctrl+C.
pub fn serve(config: &FrontendConfig) -> Result<()> {
    let frontend = Frontend::new(config.clone()).context("startup checks failed")?;
    bind_server(config)?.run(Arc::new(frontend))
}

/// Handle a single HTTP request
fn handle_request(mut request: Request, frontend: &Frontend) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let head = match request.method() {
        Method::Get | Method::Post => false,
        Method::Head => true,
        _ => return response::respond_method_not_allowed(request),
    };

    let mut info = RequestInfo::new(request.method().as_str(), request.url());

    if let Some(path) = static_file(frontend.settings(), &info.path) {
        debug!("serve"; "static {}", path.display());
        return response::respond_file(request, &path, head);
    }

    if request.method() == &Method::Post && response::is_form(&request) {
        match read_form(request.as_reader())? {
            Some(body) => info.add_form(&body),
            None => return response::respond_too_large(request),
        }
    }

    let reply = frontend.handle(&info);
    response::respond_reply(request, reply, head)
}

/// Read a form body of at most [`MAX_FORM_BYTES`]. `None` when it is larger.
fn read_form(reader: impl Read) -> Result<Option<String>> {
    let mut body = String::new();
    reader
        .take(MAX_FORM_BYTES + 1)
        .read_to_string(&mut body)
        .context("failed to read request body")?;
    Ok((body.len() as u64 <= MAX_FORM_BYTES).then_some(body))
}

/// Existing file in the static directory for a path under the context path.
fn static_file(config: &FrontendConfig, path: &str) -> Option<PathBuf> {
    let rest = path.strip_prefix(config.context_path())?;
    let rest = rest.strip_prefix('/')?;
    resolve_under(&config.paths.static_dir, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::{config, webapp, write};

    #[test]
    fn test_static_file_under_context() {
        let (_dir, webapp) = webapp();
        write(&webapp, "static/js/main.js", "console.log(1)");
        let config = config(&webapp);

        let found = static_file(&config, "/cf/js/main.js").unwrap();
        assert!(found.ends_with("js/main.js"));

        assert!(static_file(&config, "/js/main.js").is_none());
        assert!(static_file(&config, "/cf/js/missing.js").is_none());
        assert!(static_file(&config, "/cfjs/main.js").is_none());
    }

    #[test]
    fn test_form_body_size_limit() {
        let body = "corpus=zeebrieven&patt=%22schip%22";
        let read = read_form(std::io::Cursor::new(body)).unwrap();
        assert_eq!(read.as_deref(), Some(body));

        let at_limit = "a".repeat(MAX_FORM_BYTES as usize);
        assert!(read_form(at_limit.as_bytes()).unwrap().is_some());

        let oversized = "a".repeat(MAX_FORM_BYTES as usize + 1);
        assert!(read_form(oversized.as_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_static_traversal_rejected() {
        let (_dir, webapp) = webapp();
        write(&webapp, "static/ok.css", "");
        let config = config(&webapp);

        assert!(static_file(&config, "/cf/../templates/error.html").is_none());
        assert!(static_file(&config, "/cf/%2e%2e/templates/error.html").is_none());
        assert!(static_file(&config, "/cf/").is_none());
    }
}
