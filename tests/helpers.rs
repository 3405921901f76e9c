/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use gphotos::v1::Creds;

#[allow(dead_code)]
pub(crate) fn get_auth_creds() -> anyhow::Result<Creds> {
    let access_token = std::env::var("GPHOTOS_ACCESS_TOKEN")?;
    Ok(Creds::from_access_token(&access_token))
}
