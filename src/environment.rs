// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//zone detection
pub const ENV_TZ: &str = "TZ";

//fallback when neither TZ nor the host reports a usable zone
pub const FALLBACK_ZONE: &str = "UTC";
