// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query URLs for the cloud metadata endpoints (`/meta/{resource}?...`).
//!
//! Only the URL is built here; dispatching it is up to the host.

use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::form_urlencoded;

static META_PREFIX: &str = "/meta/";
static DEFAULT_LANGUAGE: &str = "en-US";
static DEFAULT_REGION: &str = "us-east-1";
static MANAGED_K8S: &str = "ManagedKubernetes";
static MODE_SUPPORTED: &str = "supported";
static IMAGE_TYPE: &str = "ImageType";

/// Metadata endpoint to query.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MetaResource {
    Regions,
    KubernetesVersions,
    Clusters,
    InstanceTypes,
    KeyPairs,
    ResourceGroups,
    Vpcs,
    Zones,
    VSwitches,
    AvailableResources,
}

impl MetaResource {
    pub fn path(&self) -> &'static str {
        match self {
            MetaResource::Regions => "alibabaRegions",
            MetaResource::KubernetesVersions => "alibabaKubernetesVersions",
            MetaResource::Clusters => "alibabaClusters",
            MetaResource::InstanceTypes => "alibabaInstanceTypes",
            MetaResource::KeyPairs => "alibabaKeyPairs",
            MetaResource::ResourceGroups => "alibabaResourceGroups",
            MetaResource::Vpcs => "alibabaVpcs",
            MetaResource::Zones => "alibabaZones",
            MetaResource::VSwitches => "alibabaVSwitches",
            MetaResource::AvailableResources => "alibabaAvailableResources",
        }
    }
}

impl fmt::Display for MetaResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/**
Query parameters for a metadata request.

The base set (credential, language, region) is always present. Optional
fields are only emitted when set. Serialized key names and order match
the URL query string produced by [MetaRequest::url].
*/
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaQuery {
    pub cloud_credential_id: String,
    pub accept_language: String,
    pub region_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_upgradable_versions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_resource: Option<String>,
}

impl Default for MetaQuery {
    fn default() -> Self {
        Self {
            cloud_credential_id: String::new(),
            accept_language: DEFAULT_LANGUAGE.into(),
            region_id: DEFAULT_REGION.into(),
            cluster_id: None,
            cluster_type: None,
            mode: None,
            get_upgradable_versions: None,
            vpc_id: None,
            resource_group_id: None,
            destination_resource: None,
        }
    }
}

/// Empty strings count as absent.
#[inline]
fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|v| !v.is_empty()).map(String::from)
}

impl MetaQuery {
    /**
    Base parameter set. Override order:
    1. defaults (`acceptLanguage=en-US`, `regionId=us-east-1`)
    2. `region_id`, if given and non-empty
    */
    pub fn new(cloud_credential_id: impl Into<String>, region_id: Option<&str>) -> Self {
        let mut q = Self {
            cloud_credential_id: cloud_credential_id.into(),
            ..Default::default()
        };
        if let Some(region) = non_empty(region_id) {
            q.region_id = region;
        }
        q
    }

    /// Add a cluster id, ignored if empty.
    pub fn with_cluster(mut self, cluster_id: &str) -> Self {
        self.cluster_id = non_empty(Some(cluster_id));
        self
    }

    /// Key/value pairs in query-string order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut out: Vec<(&'static str, String)> = vec![
            ("cloudCredentialId", self.cloud_credential_id.clone()),
            ("acceptLanguage", self.accept_language.clone()),
            ("regionId", self.region_id.clone()),
        ];
        #[rustfmt::skip]
        let optional: [(&'static str, Option<String>); 7] = [
            ("clusterId",             self.cluster_id.clone()),
            ("clusterType",           self.cluster_type.clone()),
            ("mode",                  self.mode.clone()),
            ("getUpgradableVersions", self.get_upgradable_versions.map(|b| b.to_string())),
            ("vpcId",                 self.vpc_id.clone()),
            ("resourceGroupId",       self.resource_group_id.clone()),
            ("destinationResource",   self.destination_resource.clone()),
        ];
        out.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
        out
    }
}

/* ---------------------------------- */

/// A metadata endpoint together with its query parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetaRequest {
    pub resource: MetaResource,
    pub query: MetaQuery,
}

impl MetaRequest {
    pub fn new(resource: MetaResource, query: MetaQuery) -> Self {
        Self { resource, query }
    }

    fn base(resource: MetaResource, cred: &str, region_id: Option<&str>) -> Self {
        Self::new(resource, MetaQuery::new(cred, region_id))
    }

    pub fn regions(cred: &str, region_id: Option<&str>) -> Self {
        Self::base(MetaResource::Regions, cred, region_id)
    }

    pub fn clusters(cred: &str, region_id: Option<&str>) -> Self {
        Self::base(MetaResource::Clusters, cred, region_id)
    }

    pub fn instance_types(cred: &str, region_id: Option<&str>) -> Self {
        Self::base(MetaResource::InstanceTypes, cred, region_id)
    }

    pub fn key_pairs(cred: &str, region_id: Option<&str>) -> Self {
        Self::base(MetaResource::KeyPairs, cred, region_id)
    }

    pub fn resource_groups(cred: &str, region_id: Option<&str>) -> Self {
        Self::base(MetaResource::ResourceGroups, cred, region_id)
    }

    pub fn zones(cred: &str, region_id: &str) -> Self {
        Self::base(MetaResource::Zones, cred, Some(region_id))
    }

    /// Supported managed Kubernetes versions; when editing, also ask for upgradable ones.
    pub fn kubernetes_versions(cred: &str, region_id: &str, is_edit: bool) -> Self {
        let mut req = Self::base(MetaResource::KubernetesVersions, cred, Some(region_id));
        req.query.cluster_type = Some(MANAGED_K8S.into());
        req.query.mode = Some(MODE_SUPPORTED.into());
        if is_edit {
            req.query.get_upgradable_versions = Some(true);
        }
        req
    }

    pub fn vpcs(cred: &str, region_id: &str, resource_group_id: Option<&str>) -> Self {
        let mut req = Self::base(MetaResource::Vpcs, cred, Some(region_id));
        req.query.resource_group_id = non_empty(resource_group_id);
        req
    }

    pub fn vswitches(
        cred: &str,
        region_id: &str,
        vpc_id: Option<&str>,
        resource_group_id: Option<&str>,
    ) -> Self {
        let mut req = Self::base(MetaResource::VSwitches, cred, Some(region_id));
        req.query.vpc_id = non_empty(vpc_id);
        req.query.resource_group_id = non_empty(resource_group_id);
        req
    }

    pub fn image_types(cred: &str, region_id: &str) -> Self {
        let mut req = Self::base(MetaResource::AvailableResources, cred, Some(region_id));
        req.query.destination_resource = Some(IMAGE_TYPE.into());
        req
    }

    /**
    Build the request URL: `/meta/{resource}?{form-urlencoded params}`.

    Values use `application/x-www-form-urlencoded` rules: a space becomes `+`,
    and everything except ASCII alphanumerics and `*-._` is percent-escaped.

    Returns None without a credential id, there is nothing to query then.
    */
    pub fn url(&self) -> Option<String> {
        if self.query.cloud_credential_id.is_empty() {
            debug!(resource = %self.resource, "no cloud credential, skipping metadata query");
            return None;
        }
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.query.pairs() {
            ser.append_pair(k, &v);
        }
        Some(format!("{META_PREFIX}{}?{}", self.resource.path(), ser.finish()))
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const CRED: &str = "cattle-global-data:cc-abc12";
    const CRED_ENC: &str = "cattle-global-data%3Acc-abc12";
    const REGION: &str = "cn-hangzhou";

    #[test]
    fn test_defaults() {
        let url = MetaRequest::regions(CRED, None).url().unwrap();
        assert_eq!(
            url,
            format!("/meta/alibabaRegions?cloudCredentialId={CRED_ENC}&acceptLanguage=en-US&regionId=us-east-1")
        );
        // empty region counts as absent
        assert_eq!(MetaRequest::regions(CRED, Some("")).url().unwrap(), url);
    }

    #[test]
    fn test_region_override() {
        let req = MetaRequest::clusters(CRED, Some(REGION));
        assert_eq!(req.query.region_id, REGION);
        assert!(req.url().unwrap().ends_with("&regionId=cn-hangzhou"));
    }

    #[test]
    fn test_form_encoding() {
        let mut req = MetaRequest::vpcs(CRED, REGION, Some("rg default (1)"));
        req.query.accept_language = "en-US,zh;q=0.9".into();
        let url = req.url().unwrap();
        assert!(url.contains("&acceptLanguage=en-US%2Czh%3Bq%3D0.9&"));
        assert!(url.ends_with("&resourceGroupId=rg+default+%281%29"));
    }

    #[test]
    fn test_no_credential() {
        assert!(MetaRequest::zones("", REGION).url().is_none());
    }

    #[test]
    fn test_kubernetes_versions() {
        let url = MetaRequest::kubernetes_versions(CRED, REGION, false).url().unwrap();
        assert!(url.starts_with("/meta/alibabaKubernetesVersions?"));
        assert!(url.ends_with("&clusterType=ManagedKubernetes&mode=supported"));

        let url = MetaRequest::kubernetes_versions(CRED, REGION, true).url().unwrap();
        assert!(url.ends_with("&mode=supported&getUpgradableVersions=true"));
    }

    #[test]
    fn test_vswitches_optional_extras() {
        let req = MetaRequest::vswitches(CRED, REGION, Some("vpc-1"), None);
        assert!(req.url().unwrap().ends_with("&vpcId=vpc-1"));

        let req = MetaRequest::vswitches(CRED, REGION, Some(""), Some("rg-9"));
        assert_eq!(req.query.vpc_id, None);
        assert!(req.url().unwrap().ends_with("&regionId=cn-hangzhou&resourceGroupId=rg-9"));

        let req = MetaRequest::vswitches(CRED, REGION, Some("vpc-1"), Some("rg-9"));
        assert!(req.url().unwrap().ends_with("&vpcId=vpc-1&resourceGroupId=rg-9"));
    }

    #[test]
    fn test_vpcs_and_image_types() {
        let req = MetaRequest::vpcs(CRED, REGION, None);
        assert!(req.url().unwrap().ends_with("&regionId=cn-hangzhou"));

        let req = MetaRequest::image_types(CRED, REGION);
        assert_eq!(req.resource, MetaResource::AvailableResources);
        assert!(req
            .url()
            .unwrap()
            .starts_with("/meta/alibabaAvailableResources?"));
        assert!(req.url().unwrap().ends_with("&destinationResource=ImageType"));
    }

    #[test]
    fn test_with_cluster() {
        let q = MetaQuery::new(CRED, Some(REGION)).with_cluster("c-123");
        let keys: Vec<&str> = q.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["cloudCredentialId", "acceptLanguage", "regionId", "clusterId"]);
        assert_eq!(MetaQuery::new(CRED, None).with_cluster("").cluster_id, None);
    }

    #[test]
    fn test_serialize_matches_pairs() {
        let req = MetaRequest::kubernetes_versions(CRED, REGION, true);
        let json = serde_json::to_value(&req.query).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), req.query.pairs().len());
        assert_eq!(obj["getUpgradableVersions"], serde_json::Value::Bool(true));
        assert_eq!(obj["clusterType"], "ManagedKubernetes");
        assert!(obj.get("vpcId").is_none());
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(MetaResource::VSwitches.to_string(), "alibabaVSwitches");
        assert_eq!(MetaResource::KeyPairs.path(), "alibabaKeyPairs");
        assert_eq!(
            MetaRequest::key_pairs(CRED, None).url().unwrap(),
            MetaRequest::new(MetaResource::KeyPairs, MetaQuery::new(CRED, None)).url().unwrap()
        );
        assert!(MetaRequest::instance_types(CRED, None).url().is_some());
        assert!(MetaRequest::resource_groups(CRED, None).url().is_some());
    }
}
