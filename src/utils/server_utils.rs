#![forbid(unsafe_code)]

use poem::Request;

use log::{debug, LevelFilter};

// ***************************************************************************
//                                  Traits
// ***************************************************************************
// Implemented by request types that can describe themselves in the log.
pub trait RequestDebug {
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Skip the work unless debug or higher logging is in effect.
    if log::max_level() < LevelFilter::Debug {
        return;
    }

    // Accumulate the output.
    let mut s = "\n".to_string();

    // Restate the request line and its origin.
    s += format!("  {} {}\n", http_req.method(), http_req.uri()).as_str();
    s += format!("  Remote address: {}\n", http_req.remote_addr()).as_str();

    // Accumulate the headers.
    for (name, value) in http_req.headers().iter() {
        s += format!("  Header {}: {:?}\n", name, value).as_str();
    }

    // Add the endpoint's own information.
    s += req.get_request_info().as_str();

    // Write the single log record.
    debug!("{}", s);
}
