//! HTTP response helpers.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Request, Response, StatusCode};

use crate::handler::Reply;
use crate::utils::mime::types::PLAIN;

/// Respond with a rendered page.
pub fn respond_reply(request: Request, reply: Reply, head: bool) -> Result<()> {
    if head {
        return send_head(request, reply.status, reply.content_type);
    }
    send_body(request, reply.status, reply.content_type, reply.body.into_bytes())
}

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path, head: bool) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if head {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with 405 for methods other than GET, POST and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN)?)
        .with_header(make_header("Allow", "GET, POST, HEAD")?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with 413 when a form body exceeds the accepted size.
pub fn respond_too_large(request: Request) -> Result<()> {
    send_body(request, 413, PLAIN, b"413 Payload Too Large".to_vec())
}

/// Whether the request carries an url-encoded form body.
pub fn is_form(request: &Request) -> bool {
    request.headers().iter().any(|h| {
        h.field.equiv("Content-Type")
            && h.value
                .as_str()
                .starts_with("application/x-www-form-urlencoded")
    })
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow::anyhow!("invalid header {key}: {value}"))
}
