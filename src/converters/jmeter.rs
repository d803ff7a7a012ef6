//! JMeter test plan converter
//!
//! This module assembles `.jmx` documents: one thread group holding shared
//! request defaults, a header manager, one HTTP sampler per operation and
//! two result collectors.

use super::Converter;
use super::xml::Element;
use crate::config::TestPlanConfig;
use crate::error::Result;
use crate::models::{PlannedOperation, TestPlanDocument};
use http::Uri;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const CONNECT_TIMEOUT_MS: &str = "5000";
const RESPONSE_TIMEOUT_MS: &str = "30000";
const USER_AGENT: &str = concat!("jmxforge/", env!("CARGO_PKG_VERSION"));

const DEFAULT_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
    ("User-Agent", USER_AGENT),
];

/// Fields recorded by both result collectors
const SAVE_CONFIG: [(&str, &str); 27] = [
    ("time", "true"),
    ("latency", "true"),
    ("timestamp", "true"),
    ("success", "true"),
    ("label", "true"),
    ("code", "true"),
    ("message", "true"),
    ("threadName", "true"),
    ("dataType", "true"),
    ("encoding", "false"),
    ("assertions", "true"),
    ("subresults", "true"),
    ("responseData", "false"),
    ("samplerData", "false"),
    ("xml", "false"),
    ("fieldNames", "true"),
    ("responseHeaders", "false"),
    ("requestHeaders", "false"),
    ("responseDataOnError", "false"),
    ("saveAssertionResultsFailureMessage", "true"),
    ("assertionsResultsToSave", "0"),
    ("bytes", "true"),
    ("sentBytes", "true"),
    ("url", "true"),
    ("threadCounts", "true"),
    ("idleTime", "true"),
    ("connectTime", "true"),
];

static PATH_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\{(\w+)\}").expect("placeholder pattern is valid"));
static JMETER_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").expect("variable pattern is valid"));

/// Rewrite `{name}` path placeholders into JMeter `${name}` variables.
/// Already-rewritten variables are left alone.
pub fn rewrite_placeholders(path: &str) -> String {
    PATH_PLACEHOLDER
        .replace_all(path, |caps: &Captures| {
            if caps[0].starts_with('$') {
                caps[0].to_string()
            } else {
                format!("${{{}}}", &caps[1])
            }
        })
        .into_owned()
}

/// Inverse of [`rewrite_placeholders`]
pub fn restore_placeholders(path: &str) -> String {
    JMETER_VARIABLE.replace_all(path, "{$1}").into_owned()
}

/// Components of the base URL used by the request-defaults element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub protocol: String,
    pub host: String,
    pub port: String,
    /// Path prefix without a trailing slash; empty for the root
    pub path: String,
}

impl UrlParts {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<Uri>() {
            Ok(uri) if uri.scheme_str().is_some() && uri.host().is_some() => Self {
                protocol: uri.scheme_str().unwrap_or("https").to_string(),
                host: uri.host().unwrap_or_default().to_string(),
                port: uri.port_u16().map(|p| p.to_string()).unwrap_or_default(),
                path: uri.path().trim_end_matches('/').to_string(),
            },
            _ => Self::fallback(raw),
        }
    }

    fn fallback(raw: &str) -> Self {
        let without_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
        let host = without_scheme.split('/').next().unwrap_or_default();
        tracing::debug!("base URL '{}' is not an absolute URL, using host '{}'", raw, host);
        Self {
            protocol: "https".to_string(),
            host: host.to_string(),
            port: String::new(),
            path: String::new(),
        }
    }
}

/// Converter for generating JMeter test plans
#[derive(Debug, Clone, Default)]
pub struct JmeterConverter;

impl JmeterConverter {
    /// Create a new JmeterConverter
    pub fn new() -> Self {
        Self
    }

    /// Build the document tree without rendering it
    pub fn build_plan(&self, config: &TestPlanConfig, operations: &[PlannedOperation]) -> Element {
        let url = UrlParts::parse(&config.base_url);

        let mut thread_group_tree = Element::new("hashTree")
            .child(Self::request_defaults(&url))
            .child(Element::new("hashTree"))
            .child(Self::header_manager())
            .child(Element::new("hashTree"));

        for operation in operations {
            thread_group_tree = thread_group_tree
                .child(Self::sampler(operation, &url.path))
                .child(Element::new("hashTree"));
        }

        thread_group_tree = thread_group_tree
            .child(Self::result_collector(
                "ViewResultsFullVisualizer",
                "View Results Tree",
            ))
            .child(Element::new("hashTree"))
            .child(Self::result_collector("SummaryReport", "Summary Report"))
            .child(Element::new("hashTree"));

        let plan_tree = Element::new("hashTree")
            .child(Self::thread_group(config))
            .child(thread_group_tree);

        Element::new("jmeterTestPlan")
            .attr("version", "1.2")
            .attr("properties", "5.0")
            .attr("jmeter", "5.6.3")
            .child(
                Element::new("hashTree")
                    .child(Self::test_plan(config))
                    .child(plan_tree),
            )
    }

    fn test_plan(config: &TestPlanConfig) -> Element {
        let base_url = Element::new("elementProp")
            .attr("name", "BASE_URL")
            .attr("elementType", "Argument")
            .child(string_prop("Argument.name", "BASE_URL"))
            .child(string_prop("Argument.value", &config.base_url))
            .child(string_prop("Argument.metadata", "="));

        Element::new("TestPlan")
            .attr("guiclass", "TestPlanGui")
            .attr("testclass", "TestPlan")
            .attr("testname", &config.test_plan_name)
            .attr("enabled", "true")
            .child(string_prop("TestPlan.comments", ""))
            .child(bool_prop("TestPlan.functional_mode", false))
            .child(bool_prop("TestPlan.tearDown_on_shutdown", true))
            .child(bool_prop("TestPlan.serialize_threadgroups", false))
            .child(
                Element::new("elementProp")
                    .attr("name", "TestPlan.user_defined_variables")
                    .attr("elementType", "Arguments")
                    .attr("guiclass", "ArgumentsPanel")
                    .attr("testclass", "Arguments")
                    .attr("testname", "User Defined Variables")
                    .attr("enabled", "true")
                    .child(collection_prop("Arguments.arguments").child(base_url)),
            )
            .child(string_prop("TestPlan.user_define_classpath", ""))
    }

    fn thread_group(config: &TestPlanConfig) -> Element {
        Element::new("ThreadGroup")
            .attr("guiclass", "ThreadGroupGui")
            .attr("testclass", "ThreadGroup")
            .attr("testname", "Thread Group")
            .attr("enabled", "true")
            .child(string_prop("ThreadGroup.on_sample_error", "continue"))
            .child(
                Element::new("elementProp")
                    .attr("name", "ThreadGroup.main_controller")
                    .attr("elementType", "LoopController")
                    .attr("guiclass", "LoopControlPanel")
                    .attr("testclass", "LoopController")
                    .attr("testname", "Loop Controller")
                    .attr("enabled", "true")
                    .child(bool_prop("LoopController.continue_forever", false))
                    .child(string_prop(
                        "LoopController.loops",
                        &config.loop_count.to_string(),
                    )),
            )
            .child(string_prop(
                "ThreadGroup.num_threads",
                &config.thread_count.to_string(),
            ))
            .child(string_prop(
                "ThreadGroup.ramp_time",
                &config.ramp_up_seconds.to_string(),
            ))
            .child(bool_prop("ThreadGroup.scheduler", false))
            .child(string_prop("ThreadGroup.duration", ""))
            .child(string_prop("ThreadGroup.delay", ""))
            .child(bool_prop("ThreadGroup.same_user_on_next_iteration", true))
    }

    fn request_defaults(url: &UrlParts) -> Element {
        Element::new("ConfigTestElement")
            .attr("guiclass", "HttpDefaultsGui")
            .attr("testclass", "ConfigTestElement")
            .attr("testname", "HTTP Request Defaults")
            .attr("enabled", "true")
            .child(empty_arguments())
            .child(string_prop("HTTPSampler.domain", &url.host))
            .child(string_prop("HTTPSampler.port", &url.port))
            .child(string_prop("HTTPSampler.protocol", &url.protocol))
            .child(string_prop("HTTPSampler.contentEncoding", ""))
            .child(string_prop("HTTPSampler.path", &url.path))
            .child(string_prop("HTTPSampler.concurrentPool", "6"))
            .child(string_prop("HTTPSampler.connect_timeout", ""))
            .child(string_prop("HTTPSampler.response_timeout", ""))
    }

    fn header_manager() -> Element {
        let headers = DEFAULT_HEADERS.iter().map(|(name, value)| {
            Element::new("elementProp")
                .attr("name", "")
                .attr("elementType", "Header")
                .child(string_prop("Header.name", name))
                .child(string_prop("Header.value", value))
        });

        Element::new("HeaderManager")
            .attr("guiclass", "HeaderPanel")
            .attr("testclass", "HeaderManager")
            .attr("testname", "HTTP Header Manager")
            .attr("enabled", "true")
            .child(collection_prop("HeaderManager.headers").children(headers))
    }

    fn sampler(operation: &PlannedOperation, path_prefix: &str) -> Element {
        let descriptor = &operation.descriptor;
        let path = format!("{}{}", path_prefix, rewrite_placeholders(&descriptor.path));

        let mut sampler = Element::new("HTTPSamplerProxy")
            .attr("guiclass", "HttpTestSampleGui")
            .attr("testclass", "HTTPSamplerProxy")
            .attr("testname", descriptor.display_name())
            .attr("enabled", "true");

        sampler = match &operation.body {
            Some(body) => sampler
                .child(bool_prop("HTTPSampler.postBodyRaw", true))
                .child(
                    Element::new("elementProp")
                        .attr("name", "HTTPsampler.Arguments")
                        .attr("elementType", "Arguments")
                        .child(
                            collection_prop("Arguments.arguments").child(
                                Element::new("elementProp")
                                    .attr("name", "")
                                    .attr("elementType", "HTTPArgument")
                                    .child(bool_prop("HTTPArgument.always_encode", false))
                                    .child(string_prop("Argument.value", body))
                                    .child(string_prop("Argument.metadata", "=")),
                            ),
                        ),
                ),
            None => sampler.child(empty_arguments()),
        };

        sampler
            .child(string_prop("HTTPSampler.domain", ""))
            .child(string_prop("HTTPSampler.port", ""))
            .child(string_prop("HTTPSampler.protocol", ""))
            .child(string_prop("HTTPSampler.contentEncoding", ""))
            .child(string_prop("HTTPSampler.path", &path))
            .child(string_prop("HTTPSampler.method", descriptor.method.as_str()))
            .child(bool_prop("HTTPSampler.follow_redirects", true))
            .child(bool_prop("HTTPSampler.auto_redirects", false))
            .child(bool_prop("HTTPSampler.use_keepalive", true))
            .child(bool_prop("HTTPSampler.DO_MULTIPART_POST", false))
            .child(string_prop("HTTPSampler.embedded_url_re", ""))
            .child(string_prop("HTTPSampler.connect_timeout", CONNECT_TIMEOUT_MS))
            .child(string_prop("HTTPSampler.response_timeout", RESPONSE_TIMEOUT_MS))
    }

    fn result_collector(guiclass: &str, testname: &str) -> Element {
        let fields = SAVE_CONFIG
            .iter()
            .map(|(name, value)| Element::new(*name).text(*value));

        Element::new("ResultCollector")
            .attr("guiclass", guiclass)
            .attr("testclass", "ResultCollector")
            .attr("testname", testname)
            .attr("enabled", "true")
            .child(bool_prop("ResultCollector.error_logging", false))
            .child(
                Element::new("objProp")
                    .child(Element::new("name").text("saveConfig"))
                    .child(
                        Element::new("value")
                            .attr("class", "SampleSaveConfiguration")
                            .children(fields),
                    ),
            )
            .child(string_prop("filename", ""))
    }
}

impl Converter for JmeterConverter {
    type Output = TestPlanDocument;

    fn convert(
        &self,
        config: &TestPlanConfig,
        operations: &[PlannedOperation],
    ) -> Result<Self::Output> {
        let plan = self.build_plan(config, operations);
        Ok(TestPlanDocument::new(plan.render_document()))
    }
}

fn string_prop(name: &str, value: &str) -> Element {
    Element::new("stringProp").attr("name", name).text(value)
}

fn bool_prop(name: &str, value: bool) -> Element {
    Element::new("boolProp")
        .attr("name", name)
        .text(value.to_string())
}

fn collection_prop(name: &str) -> Element {
    Element::new("collectionProp").attr("name", name)
}

fn empty_arguments() -> Element {
    Element::new("elementProp")
        .attr("name", "HTTPsampler.Arguments")
        .attr("elementType", "Arguments")
        .attr("guiclass", "HTTPArgumentsPanel")
        .attr("testclass", "Arguments")
        .attr("testname", "User Defined Variables")
        .attr("enabled", "true")
        .child(collection_prop("Arguments.arguments"))
}
