// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the drivers service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use roster_core::env::get_optional_var;
use roster_drivers::serve;
use std::net::Ipv4Addr;

/// Prefix of all environment variables that configure the service.
const ENV_PREFIX: &str = "ROSTER";

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 5001;

/// Program's entry point.
#[tokio::main]
async fn main() -> Result<(), String> {
    env_logger::init();

    let port = get_optional_var::<u16>(ENV_PREFIX, "PORT")?.unwrap_or(DEFAULT_PORT);
    let bind_any = get_optional_var::<bool>(ENV_PREFIX, "BIND_ANY")?.unwrap_or(false);
    let ip = if bind_any { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };

    serve((ip, port)).await.map_err(|e| e.to_string())
}
