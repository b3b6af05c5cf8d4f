// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by `Config::from_env`.
pub const OSS_ACCESS_KEY_ID: &str = "OSS_ACCESS_KEY_ID";
pub const OSS_ACCESS_KEY_SECRET: &str = "OSS_ACCESS_KEY_SECRET";
pub const OSS_BUCKET: &str = "OSS_BUCKET";
pub const OSS_ENDPOINT: &str = "OSS_ENDPOINT";
pub const OSS_PREFIX: &str = "OSS_PREFIX";
pub const OSS_CDN: &str = "OSS_CDN";

// Headers used in oss services.
pub const CONTENT_MD5: &str = "content-md5";
pub const X_OSS_HASH_CRC64ECMA: &str = "x-oss-hash-crc64ecma";

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "oss-cn-hangzhou.aliyuncs.com";

/// Sub-resource that returns the metadata of an object.
pub const OBJECT_META: &str = "objectMeta";

/// Lifetime of a signed url when the caller does not pick one.
pub const DEFAULT_SIGN_URL_TTL: Duration = Duration::from_secs(60);

/// AsciiSet for object keys placed in a request path or signed url.
///
/// Encode every byte except the unreserved characters and `/`.
pub static OSS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for signatures placed in a query component.
pub static OSS_QUERY_ENCODE_SET: &AsciiSet = NON_ALPHANUMERIC;
