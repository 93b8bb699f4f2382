//! cURL file parsing and translation to Postman request items

pub mod parser;
pub mod translate;

pub use parser::{parse_curl_command, parse_curl_file, CurlBody, ParsedCurl};
pub use translate::{decompose_url, parse_query, to_item};
