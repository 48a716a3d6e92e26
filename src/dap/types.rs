//! DAP payload type declarations.
//!
//! Mirrors the Debug Adapter Protocol JSON schema
//! (<https://microsoft.github.io/debug-adapter-protocol>): structs for event
//! bodies, request arguments and response bodies, plus the string-valued
//! enums. Unknown object fields are ignored at decode; unknown enum values
//! fall back to an `Other` variant so a newer adapter never breaks the
//! session.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

macro_rules! fromstr_deser {
    ($t:ty) => {
        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                FromStr::from_str(&s).map_err(de::Error::custom)
            }
        }
    };
}

macro_rules! tostr_ser {
    ($t:ty) => {
        impl Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }
    };
}

/// The reason for a `stopped` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoppedReason {
    Step,
    Breakpoint,
    Exception,
    Pause,
    Entry,
    Goto,
    #[strum(serialize = "function breakpoint")]
    FunctionBreakpoint,
    #[strum(serialize = "data breakpoint")]
    DataBreakpoint,
    #[strum(serialize = "instruction breakpoint")]
    InstructionBreakpoint,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { StoppedReason }
tostr_ser! { StoppedReason }

/// The reason for a `thread` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ThreadEventReason {
    Started,
    Exited,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { ThreadEventReason }
tostr_ser! { ThreadEventReason }

/// The output category of an `output` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputCategory {
    Console,
    Important,
    Stdout,
    Stderr,
    Telemetry,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { OutputCategory }
tostr_ser! { OutputCategory }

/// The reason for a `breakpoint` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BreakpointEventReason {
    Changed,
    New,
    Removed,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { BreakpointEventReason }
tostr_ser! { BreakpointEventReason }

/// The reason for a `module` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ModuleEventReason {
    New,
    Changed,
    Removed,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { ModuleEventReason }
tostr_ser! { ModuleEventReason }

/// The reason for a `loadedSource` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LoadedSourceEventReason {
    New,
    Changed,
    Removed,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { LoadedSourceEventReason }
tostr_ser! { LoadedSourceEventReason }

/// How a debuggee process was started, per the `process` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ProcessStartMethod {
    Launch,
    Attach,
    AttachForSuspendedLaunch,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { ProcessStartMethod }
tostr_ser! { ProcessStartMethod }

/// Logical areas named by an `invalidated` event.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InvalidatedAreas {
    All,
    Stacks,
    Threads,
    Variables,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { InvalidatedAreas }
tostr_ser! { InvalidatedAreas }

/// Checksum algorithms an adapter may announce.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
pub enum ChecksumAlgorithm {
    MD5,
    SHA1,
    SHA256,
    #[strum(serialize = "timestamp")]
    Timestamp,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { ChecksumAlgorithm }
tostr_ser! { ChecksumAlgorithm }

/// Hint for how to present a source in the UI.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SourcePresentationHint {
    Normal,
    Emphasize,
    Deemphasize,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { SourcePresentationHint }
tostr_ser! { SourcePresentationHint }

/// Hint for how to present a stack frame in the UI.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StackFramePresentationHint {
    Normal,
    Label,
    Subtle,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { StackFramePresentationHint }
tostr_ser! { StackFramePresentationHint }

/// Hint for how to present a scope in the UI.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ScopePresentationHint {
    Arguments,
    Locals,
    Registers,
    #[strum(serialize = "returnValue")]
    ReturnValue,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { ScopePresentationHint }
tostr_ser! { ScopePresentationHint }

/// The access type of a data breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum DataBreakpointAccessType {
    Read,
    Write,
    ReadWrite,
    #[strum(default)]
    Other(String),
}

fromstr_deser! { DataBreakpointAccessType }
tostr_ser! { DataBreakpointAccessType }

/// The granularity of one step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SteppingGranularity {
    Statement,
    Line,
    Instruction,
}

/// Filter applied to a `variables` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariablesFilter {
    Indexed,
    Named,
}

/// A module id is either a number or a string, at the adapter's discretion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    Number(i64),
    String(String),
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleId::Number(n) => write!(f, "{n}"),
            ModuleId::String(s) => write!(f, "{s}"),
        }
    }
}

/// The checksum of an item calculated by the specified algorithm.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Checksum {
    /// The algorithm used to calculate this checksum.
    pub algorithm: ChecksumAlgorithm,
    /// Value of the checksum, encoded as a hexadecimal value.
    pub checksum: String,
}

/// A `Source` is a descriptor for source code. It is returned from the debug
/// adapter as part of a `StackFrame` and it is used by clients when
/// specifying breakpoints.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// The short name of the source. Every source returned from the debug
    /// adapter has a name. When sending a source to the debug adapter this
    /// name is optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The path of the source to be shown in the UI. It is only used to
    /// locate and load the content of the source if no `sourceReference` is
    /// specified (or its value is 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// If the value > 0 the contents of the source must be retrieved through
    /// the `source` request (even if a path is specified). Since a
    /// `sourceReference` is only valid for a session, it can not be used to
    /// persist a source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<i64>,
    /// A hint for how to present the source in the UI. A value of
    /// `deemphasize` can be used to indicate that the source is not available
    /// or that it is skipped on stepping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<SourcePresentationHint>,
    /// The origin of this source. For example, 'internal module',
    /// 'inlined content from source map', etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// A list of sources that are related to this source. These may be the
    /// source that generated this source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    /// Additional data that a debug adapter might want to loop through the
    /// client. The client should leave the data intact and persist it across
    /// sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter_data: Option<serde_json::Value>,
    /// The checksums associated with this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksums: Option<Vec<Checksum>>,
}

/// Properties of a breakpoint location passed to the `setBreakpoints`
/// request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceBreakpoint {
    /// The source line of the breakpoint or logpoint.
    pub line: i64,
    /// Start position within source line of the breakpoint or logpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    /// The expression for conditional breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// The expression that controls how many hits of the breakpoint are
    /// ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_condition: Option<String>,
    /// If this attribute exists and is non-empty, the adapter must not
    /// 'break' (stop) but log the message instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_message: Option<String>,
    /// The mode of this breakpoint. If defined, this must be one of the
    /// `breakpointModes` the debug adapter advertised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Properties of a breakpoint passed to the `setFunctionBreakpoints`
/// request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionBreakpoint {
    /// The name of the function.
    pub name: String,
    /// An expression for conditional breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// An expression that controls how many hits of the breakpoint are
    /// ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_condition: Option<String>,
}

/// Properties of a data breakpoint passed to the `setDataBreakpoints`
/// request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataBreakpoint {
    /// An id representing the data. This id is returned from the
    /// `dataBreakpointInfo` request.
    pub data_id: String,
    /// The access type of the data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_type: Option<DataBreakpointAccessType>,
    /// An expression for conditional breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// An expression that controls how many hits of the breakpoint are
    /// ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_condition: Option<String>,
}

/// Information about a breakpoint created in `setBreakpoints`,
/// `setFunctionBreakpoints`, `setInstructionBreakpoints` or
/// `setDataBreakpoints` requests.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// The identifier for the breakpoint. It is needed if breakpoint events
    /// are used to update or remove breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// If true, the breakpoint could be set (but not necessarily at the
    /// desired location).
    pub verified: bool,
    /// A message about the state of the breakpoint. This is shown to the
    /// user and can be used to explain why a breakpoint could not be
    /// verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The source where the breakpoint is located.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// The start line of the actual range covered by the breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    /// Start position of the source range covered by the breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    /// The end line of the actual range covered by the breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    /// End position of the source range covered by the breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i64>,
    /// A memory reference to where the breakpoint is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_reference: Option<String>,
    /// The offset from the instruction reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// A machine-readable explanation of why a breakpoint may not be
    /// verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A thread.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    /// Unique identifier for the thread.
    pub id: i64,
    /// The name of the thread.
    pub name: String,
}

/// A stack frame in the debuggee's execution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// An identifier for the stack frame. It must be unique across all
    /// threads. This id can be used to retrieve the scopes of the frame with
    /// the `scopes` request or to restart the execution of a stack frame.
    pub id: i64,
    /// The name of the stack frame, typically a method name.
    pub name: String,
    /// The source of the frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// The line within the source of the frame. If the source attribute is
    /// missing or doesn't exist, line is 0 and should be ignored by the
    /// client.
    pub line: i64,
    /// Start position of the range covered by the stack frame.
    pub column: i64,
    /// The end line of the range covered by the stack frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    /// End position of the range covered by the stack frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i64>,
    /// Indicates whether this frame can be restarted with the
    /// `restartFrame` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_restart: Option<bool>,
    /// A memory reference for the current instruction pointer in this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_pointer_reference: Option<String>,
    /// The module associated with this frame, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
    /// A hint for how to present this frame in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<StackFramePresentationHint>,
}

/// A `Scope` is a named container for variables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    /// Name of the scope such as 'Arguments', 'Locals', or 'Registers'.
    /// This string is shown in the UI as is and can be translated.
    pub name: String,
    /// A hint for how to present this scope in the UI. If this attribute is
    /// missing, the scope is shown with a generic UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<ScopePresentationHint>,
    /// The variables of this scope can be retrieved by passing the value of
    /// `variablesReference` to the `variables` request as long as execution
    /// remains suspended.
    pub variables_reference: i64,
    /// The number of named variables in this scope. The client can use this
    /// information to present the variables in a paged UI and fetch them in
    /// chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    /// The number of indexed variables in this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
    /// If true, the number of variables in this scope is large or expensive
    /// to retrieve.
    pub expensive: bool,
    /// The source for this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// The start line of the range covered by this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    /// Start position of the range covered by the scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    /// The end line of the range covered by this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    /// End position of the range covered by the scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i64>,
}

/// Properties of a variable that can be used to determine how to render the
/// variable in the UI.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariablePresentationHint {
    /// The kind of variable. Before introducing additional values, try to
    /// use the listed values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Set of attributes represented as an array of strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
    /// Visibility of variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// If true, clients can present the variable with a UI that supports a
    /// specific gesture to trigger its evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
}

/// A Variable is a name/value pair. The `type` attribute is shown if space
/// permits or when hovering over the variable's name.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// The variable's name.
    pub name: String,
    /// The variable's value. This can be a multi-line text, e.g. for a
    /// function the body of a function.
    pub value: String,
    /// The type of the variable's value. Typically shown in the UI when
    /// hovering over the value.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    /// Properties of a variable that can be used to determine how to render
    /// the variable in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<VariablePresentationHint>,
    /// The evaluatable name of this variable which can be passed to the
    /// `evaluate` request to fetch the variable's value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluate_name: Option<String>,
    /// If `variablesReference` is > 0, the variable is structured and its
    /// children can be retrieved by passing `variablesReference` to the
    /// `variables` request as long as execution remains suspended.
    pub variables_reference: i64,
    /// The number of named child variables. The client can use this
    /// information to present the children in a paged UI and fetch them in
    /// chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    /// The number of indexed child variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
    /// A memory reference associated with this variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_reference: Option<String>,
    /// A reference that allows the client to request the location where the
    /// variable is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration_location_reference: Option<i64>,
    /// A reference that allows the client to request the location where the
    /// variable's value is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_location_reference: Option<i64>,
}

/// A Module object represents a row in the modules view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Unique identifier for the module.
    pub id: ModuleId,
    /// A name of the module.
    pub name: String,
    /// Logical full path to the module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// True if the module is optimized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_optimized: Option<bool>,
    /// True if the module is considered 'user code' by a debugger that
    /// supports 'Just My Code'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user_code: Option<bool>,
    /// Version of Module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// User-understandable description of if symbols were found for the
    /// module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_status: Option<String>,
    /// Logical full path to the symbol file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_file_path: Option<String>,
    /// Module created or modified, encoded as a RFC 3339 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_stamp: Option<String>,
    /// Address range covered by this module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_range: Option<String>,
}

/// An `ExceptionBreakpointsFilter` is shown in the UI as a filter option for
/// configuring how exceptions are dealt with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionBreakpointsFilter {
    /// The internal ID of the filter option. This value is passed to the
    /// `setExceptionBreakpoints` request.
    pub filter: String,
    /// The name of the filter option. This is shown in the UI.
    pub label: String,
    /// A help text providing additional information about the exception
    /// filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial value of the filter option. If not specified a value false is
    /// assumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Controls whether a condition can be specified for this filter option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_condition: Option<bool>,
    /// A help text providing information about the condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_description: Option<String>,
}

/// A `ColumnDescriptor` specifies what module attribute to show in a column
/// of the modules view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Name of the attribute rendered in this column.
    pub attribute_name: String,
    /// Header UI label of column.
    pub label: String,
    /// Format to use for the rendered values in this column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Datatype of values in this column. Defaults to `string` if not
    /// specified.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    /// Width of this column in characters (hint only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

/// A `BreakpointMode` is provided as an option when setting breakpoints on
/// sources or instructions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointMode {
    /// The internal ID of the mode. This value is passed to the
    /// `setBreakpoints` request.
    pub mode: String,
    /// The name of the breakpoint mode. This is shown in the UI.
    pub label: String,
    /// A help text providing additional information about the breakpoint
    /// mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Describes one or more types of breakpoint this mode applies to.
    pub applies_to: Vec<String>,
}

/// Information about the capabilities of a debug adapter.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// The debug adapter supports the `configurationDone` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_configuration_done_request: Option<bool>,
    /// The debug adapter supports function breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_function_breakpoints: Option<bool>,
    /// The debug adapter supports conditional breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_conditional_breakpoints: Option<bool>,
    /// The debug adapter supports breakpoints that break execution after a
    /// specified number of hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_hit_conditional_breakpoints: Option<bool>,
    /// The debug adapter supports a (side effect free) `evaluate` request
    /// for data hovers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_evaluate_for_hovers: Option<bool>,
    /// Available exception filter options for the `setExceptionBreakpoints`
    /// request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_breakpoint_filters: Option<Vec<ExceptionBreakpointsFilter>>,
    /// The debug adapter supports stepping back via the `stepBack` and
    /// `reverseContinue` requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_step_back: Option<bool>,
    /// The debug adapter supports setting a variable to a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_set_variable: Option<bool>,
    /// The debug adapter supports restarting a frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_restart_frame: Option<bool>,
    /// The debug adapter supports the `gotoTargets` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_goto_targets_request: Option<bool>,
    /// The debug adapter supports the `stepInTargets` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_step_in_targets_request: Option<bool>,
    /// The debug adapter supports the `completions` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_completions_request: Option<bool>,
    /// The set of characters that should trigger completion in a REPL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_trigger_characters: Option<Vec<String>>,
    /// The debug adapter supports the `modules` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_modules_request: Option<bool>,
    /// The set of additional module information exposed by the debug
    /// adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_module_columns: Option<Vec<ColumnDescriptor>>,
    /// Checksum algorithms supported by the debug adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_checksum_algorithms: Option<Vec<ChecksumAlgorithm>>,
    /// The debug adapter supports the `restart` request. In this case a
    /// client should not implement `restart` by terminating and relaunching
    /// the adapter but by calling the `restart` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_restart_request: Option<bool>,
    /// The debug adapter supports `exceptionOptions` on the
    /// `setExceptionBreakpoints` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_exception_options: Option<bool>,
    /// The debug adapter supports a `format` attribute on the `stackTrace`,
    /// `variables`, and `evaluate` requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_value_formatting_options: Option<bool>,
    /// The debug adapter supports the `exceptionInfo` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_exception_info_request: Option<bool>,
    /// The debug adapter supports the `terminateDebuggee` attribute on the
    /// `disconnect` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_terminate_debuggee: Option<bool>,
    /// The debug adapter supports the `suspendDebuggee` attribute on the
    /// `disconnect` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_suspend_debuggee: Option<bool>,
    /// The debug adapter supports the delayed loading of parts of the stack,
    /// which requires that both the `startFrame` and `levels` arguments and
    /// the `totalFrames` result of the `stackTrace` request are supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_delayed_stack_trace_loading: Option<bool>,
    /// The debug adapter supports the `loadedSources` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_loaded_sources_request: Option<bool>,
    /// The debug adapter supports log points by interpreting the
    /// `logMessage` attribute of the `SourceBreakpoint`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_log_points: Option<bool>,
    /// The debug adapter supports the `terminateThreads` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_terminate_threads_request: Option<bool>,
    /// The debug adapter supports the `setExpression` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_set_expression: Option<bool>,
    /// The debug adapter supports the `terminate` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_terminate_request: Option<bool>,
    /// The debug adapter supports data breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_data_breakpoints: Option<bool>,
    /// The debug adapter supports the `readMemory` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_read_memory_request: Option<bool>,
    /// The debug adapter supports the `writeMemory` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_write_memory_request: Option<bool>,
    /// The debug adapter supports the `disassemble` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_disassemble_request: Option<bool>,
    /// The debug adapter supports the `cancel` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_cancel_request: Option<bool>,
    /// The debug adapter supports the `breakpointLocations` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_breakpoint_locations_request: Option<bool>,
    /// The debug adapter supports the `clipboard` context value in the
    /// `evaluate` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_clipboard_context: Option<bool>,
    /// The debug adapter supports stepping granularities (argument
    /// `granularity`) for the stepping requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_stepping_granularity: Option<bool>,
    /// The debug adapter supports adding breakpoints based on instruction
    /// references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_instruction_breakpoints: Option<bool>,
    /// The debug adapter supports `filterOptions` as an argument on the
    /// `setExceptionBreakpoints` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_exception_filter_options: Option<bool>,
    /// The debug adapter supports the `singleThread` property on the
    /// execution requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_single_thread_execution_requests: Option<bool>,
    /// The debug adapter supports the `asAddress` and `bytes` fields in the
    /// `dataBreakpointInfo` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_data_breakpoint_bytes: Option<bool>,
    /// Modes of breakpoints supported by the debug adapter, such as
    /// 'hardware' or 'software'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint_modes: Option<Vec<BreakpointMode>>,
    /// The debug adapter supports ANSI escape sequences in styling of
    /// `OutputEvent.output` and `Variable.value` fields.
    #[serde(rename = "supportsANSIStyling", skip_serializing_if = "Option::is_none")]
    pub supports_ansi_styling: Option<bool>,
}

/// A structured message object. Used to return errors from requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique (within a debug adapter implementation) identifier for the
    /// message.
    pub id: i64,
    /// A format string for the message. Embedded variables have the form
    /// `{name}`.
    pub format: String,
    /// An object used as a dictionary for looking up the variables in the
    /// format string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
    /// If true send to telemetry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_telemetry: Option<bool>,
    /// If true show user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_user: Option<bool>,
    /// A url where additional information about this message can be found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// A label that is presented to the user as the UI for opening the url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_label: Option<String>,
}

// ---------------------------------------------------------------------------
// event bodies
// ---------------------------------------------------------------------------

/// Body of a `stopped` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoppedEventBody {
    /// The reason for the event.
    pub reason: StoppedReason,
    /// The full reason for the event, e.g. 'Paused on exception'. This
    /// string is shown in the UI as is and can be translated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The thread which was stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    /// A value of true hints to the client that this event should not change
    /// the focus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_focus_hint: Option<bool>,
    /// Additional information. E.g. if reason is `exception`, text contains
    /// the exception name. This string is shown in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// If `allThreadsStopped` is true, a debug adapter can announce that all
    /// threads have stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_stopped: Option<bool>,
    /// Ids of the breakpoints that triggered the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_breakpoint_ids: Option<Vec<i64>>,
}

/// Body of a `continued` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinuedEventBody {
    /// The thread which was continued.
    pub thread_id: i64,
    /// If `allThreadsContinued` is true, a debug adapter can announce that
    /// all threads have continued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_continued: Option<bool>,
}

/// Body of an `exited` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExitedEventBody {
    /// The exit code returned from the debuggee.
    pub exit_code: i64,
}

/// Body of a `terminated` event.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminatedEventBody {
    /// A debug adapter may set `restart` to true (or to an arbitrary object)
    /// to request that the client restarts the session. The value is not
    /// interpreted by the client and passed unmodified as an attribute
    /// `__restart` to the `launch` and `attach` requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<serde_json::Value>,
}

/// Body of a `thread` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEventBody {
    /// The reason for the event.
    pub reason: ThreadEventReason,
    /// The identifier of the thread.
    pub thread_id: i64,
}

/// Body of an `output` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputEventBody {
    /// The output category. If not specified or if the category is not
    /// understood by the client, `console` is assumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<OutputCategory>,
    /// The output to report.
    pub output: String,
    /// Support for keeping an output log organized by grouping related
    /// messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// If an attribute `variablesReference` exists and its value is > 0, the
    /// output contains objects which can be retrieved by passing
    /// `variablesReference` to the `variables` request as long as execution
    /// remains suspended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    /// The source location where the output was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// The source location's line where the output was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    /// The position in `line` where the output was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    /// Additional data to report. For the `telemetry` category the data is
    /// sent to telemetry, for the other categories the data is shown in JSON
    /// format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Body of a `breakpoint` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointEventBody {
    /// The reason for the event.
    pub reason: BreakpointEventReason,
    /// The `id` attribute is used to find the target breakpoint, the other
    /// attributes are used as the new values.
    pub breakpoint: Breakpoint,
}

/// Body of a `module` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEventBody {
    /// The reason for the event.
    pub reason: ModuleEventReason,
    /// The new, changed, or removed module. In case of `removed` only the
    /// module id is used.
    pub module: Module,
}

/// Body of a `loadedSource` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSourceEventBody {
    /// The reason for the event.
    pub reason: LoadedSourceEventReason,
    /// The new, changed, or removed source.
    pub source: Source,
}

/// Body of a `process` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEventBody {
    /// The logical name of the process. This is usually the full path to the
    /// process's executable file.
    pub name: String,
    /// The process ID of the debugged process, as assigned by the operating
    /// system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_process_id: Option<i64>,
    /// If true, the process is running on the same computer as the debug
    /// adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_local_process: Option<bool>,
    /// Describes how the debug engine started debugging this process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_method: Option<ProcessStartMethod>,
    /// The size of a pointer or address for this process, in bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_size: Option<i64>,
}

/// Body of a `capabilities` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesEventBody {
    /// The set of updated capabilities.
    pub capabilities: Capabilities,
}

/// Body of an `invalidated` event.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvalidatedEventBody {
    /// Set of logical areas that got invalidated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<InvalidatedAreas>>,
    /// If specified, the client only needs to refetch data related to this
    /// thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    /// If specified, the client only needs to refetch data related to this
    /// stack frame (and the `threadId` is ignored).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_frame_id: Option<i64>,
}

/// Body of a `memory` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEventBody {
    /// Memory reference of a memory range that has been updated.
    pub memory_reference: String,
    /// Starting offset in bytes where memory has been updated.
    pub offset: i64,
    /// Number of bytes updated.
    pub count: i64,
}

// ---------------------------------------------------------------------------
// request arguments
// ---------------------------------------------------------------------------

/// Arguments for an `initialize` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequestArguments {
    /// The ID of the client using this adapter.
    #[serde(rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// The human-readable name of the client using this adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// The ID of the debug adapter.
    #[serde(rename = "adapterID")]
    pub adapter_id: String,
    /// The ISO-639 locale of the client using this adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// If true all line numbers are 1-based (default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_start_at1: Option<bool>,
    /// If true all column numbers are 1-based (default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_start_at1: Option<bool>,
    /// Determines in what format paths are specified. The default is `path`,
    /// which is the native format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_format: Option<String>,
    /// Client supports the `type` attribute for variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_variable_type: Option<bool>,
    /// Client supports the paging of variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_variable_paging: Option<bool>,
    /// Client supports the `runInTerminal` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_run_in_terminal_request: Option<bool>,
    /// Client supports memory references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_memory_references: Option<bool>,
    /// Client supports progress reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_progress_reporting: Option<bool>,
    /// Client supports the `invalidated` event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_invalidated_event: Option<bool>,
    /// Client supports the `memory` event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_memory_event: Option<bool>,
    /// Client supports the `argsCanBeInterpretedByShell` attribute on the
    /// `runInTerminal` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_args_can_be_interpreted_by_shell: Option<bool>,
    /// Client supports the `startDebugging` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_start_debugging_request: Option<bool>,
    /// The client will interpret ANSI escape sequences in the display of
    /// `OutputEvent.output` and `Variable.value` fields.
    #[serde(rename = "supportsANSIStyling", skip_serializing_if = "Option::is_none")]
    pub supports_ansi_styling: Option<bool>,
}

/// Arguments for a `launch` request. Additional attributes are
/// implementation specific and travel alongside these as sibling fields.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequestArguments {
    /// If true, the launch request should launch the program without
    /// enabling debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_debug: Option<bool>,
    /// Arbitrary data from the previous, restarted session. The data is sent
    /// as the `restart` attribute of the `terminated` event.
    #[serde(rename = "__restart", skip_serializing_if = "Option::is_none")]
    pub restart: Option<serde_json::Value>,
}

/// Arguments for an `attach` request. Additional attributes are
/// implementation specific and travel alongside these as sibling fields.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttachRequestArguments {
    /// Arbitrary data from the previous, restarted session.
    #[serde(rename = "__restart", skip_serializing_if = "Option::is_none")]
    pub restart: Option<serde_json::Value>,
}

/// Arguments for a `continue` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinueArguments {
    /// Specifies the active thread. If the debug adapter supports single
    /// thread execution and `singleThread` is true, only this thread is
    /// resumed.
    pub thread_id: i64,
    /// If this flag is true, execution is resumed only for the thread with
    /// the given `threadId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
}

/// Arguments for a `next` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NextArguments {
    /// Specifies the thread for which to resume execution for one step.
    pub thread_id: i64,
    /// If this flag is true, all other suspended threads are not resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
    /// Stepping granularity. If no granularity is specified, a granularity
    /// of `statement` is assumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<SteppingGranularity>,
}

/// Arguments for a `stepIn` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepInArguments {
    /// Specifies the thread for which to resume execution for one step-into.
    pub thread_id: i64,
    /// If this flag is true, all other suspended threads are not resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
    /// Id of the target to step into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    /// Stepping granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<SteppingGranularity>,
}

/// Arguments for a `stepOut` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepOutArguments {
    /// Specifies the thread for which to resume execution for one
    /// step-out.
    pub thread_id: i64,
    /// If this flag is true, all other suspended threads are not resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
    /// Stepping granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<SteppingGranularity>,
}

/// Arguments for a `stepBack` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepBackArguments {
    /// Specifies the thread for which to resume execution for one step
    /// backwards.
    pub thread_id: i64,
    /// If this flag is true, all other suspended threads are not resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
    /// Stepping granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<SteppingGranularity>,
}

/// Arguments for a `reverseContinue` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReverseContinueArguments {
    /// Specifies the active thread.
    pub thread_id: i64,
    /// If this flag is true, backward execution is resumed only for the
    /// thread with the given `threadId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
}

/// Arguments for a `pause` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PauseArguments {
    /// Pause execution for this thread.
    pub thread_id: i64,
}

/// Arguments for a `goto` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GotoArguments {
    /// Set the goto target for this thread.
    pub thread_id: i64,
    /// The location where the debuggee will continue to run.
    pub target_id: i64,
}

/// Arguments for a `restartFrame` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestartFrameArguments {
    /// Restart the stack frame identified by `frameId`.
    pub frame_id: i64,
}

/// Arguments for a `stackTrace` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceArguments {
    /// Retrieve the stacktrace for this thread.
    pub thread_id: i64,
    /// The index of the first frame to return; if omitted frames start at 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<i64>,
    /// The maximum number of frames to return. If levels is not specified or
    /// 0, all frames are returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<i64>,
}

/// Arguments for a `scopes` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScopesArguments {
    /// Retrieve the scopes for the stack frame identified by `frameId`.
    pub frame_id: i64,
}

/// Arguments for a `variables` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariablesArguments {
    /// The variable for which to retrieve its children.
    pub variables_reference: i64,
    /// Filter to limit the child variables to either named or indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<VariablesFilter>,
    /// The index of the first variable to return; if omitted children start
    /// at 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// The number of variables to return. If count is missing or 0, all
    /// variables are returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Arguments for a `setVariable` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableArguments {
    /// The reference of the variable container.
    pub variables_reference: i64,
    /// The name of the variable in the container.
    pub name: String,
    /// The value of the variable.
    pub value: String,
}

/// Arguments for a `setExpression` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetExpressionArguments {
    /// The l-value expression to assign to.
    pub expression: String,
    /// The value expression to assign to the l-value expression.
    pub value: String,
    /// Evaluate the expressions in the scope of this stack frame. If not
    /// specified, the expressions are evaluated in the global scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<i64>,
}

/// Arguments for a `source` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceArguments {
    /// Specifies the source content to load. Either `source.path` or
    /// `source.sourceReference` must be specified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// The reference to the source. This is the same as
    /// `source.sourceReference`. This is provided for backward
    /// compatibility since old clients do not understand the `source`
    /// attribute.
    pub source_reference: i64,
}

/// Arguments for a `setBreakpoints` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetBreakpointsArguments {
    /// The source location of the breakpoints; either `source.path` or
    /// `source.sourceReference` must be specified.
    pub source: Source,
    /// The code locations of the breakpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<SourceBreakpoint>>,
    /// A value of true indicates that the underlying source has been
    /// modified which results in new breakpoint locations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_modified: Option<bool>,
}

/// Arguments for a `setFunctionBreakpoints` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetFunctionBreakpointsArguments {
    /// The function names of the breakpoints.
    pub breakpoints: Vec<FunctionBreakpoint>,
}

/// Arguments for a `setDataBreakpoints` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetDataBreakpointsArguments {
    /// The contents of this array replaces all existing data breakpoints.
    /// An empty array clears all data breakpoints.
    pub breakpoints: Vec<DataBreakpoint>,
}

/// Arguments for a `dataBreakpointInfo` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataBreakpointInfoArguments {
    /// Reference to the variable container if the data breakpoint is
    /// requested for a child of the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    /// The name of the variable's child to obtain data breakpoint
    /// information for. If `variablesReference` isn't specified, this can be
    /// an expression.
    pub name: String,
    /// When `name` is an expression, evaluate it in the scope of this stack
    /// frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<i64>,
    /// If specified, a debug adapter should return information for the range
    /// of memory extending `bytes` number of bytes from the address or
    /// variable specified by `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<i64>,
    /// If true, the `name` is a memory address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_address: Option<bool>,
    /// The mode of the desired breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Arguments for a `disconnect` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectArguments {
    /// A value of true indicates that this `disconnect` request is part of a
    /// restart sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
    /// Indicates whether the debuggee should be terminated when the
    /// debugger is disconnected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_debuggee: Option<bool>,
    /// Indicates whether the debuggee should stay suspended when the
    /// debugger is disconnected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_debuggee: Option<bool>,
}

/// Arguments for a `terminate` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminateArguments {
    /// A value of true indicates that this `terminate` request is part of a
    /// restart sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
}

/// Arguments for a `terminateThreads` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminateThreadsArguments {
    /// Ids of threads to be terminated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ids: Option<Vec<i64>>,
}

/// Arguments for a `restart` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestartArguments {
    /// The latest version of the `launch` or `attach` configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

/// Arguments for a `cancel` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancelArguments {
    /// The ID (attribute `seq`) of the request to cancel. If missing no
    /// request is cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    /// The ID (attribute `progressId`) of the progress to cancel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_id: Option<String>,
}

/// Arguments for a `modules` request.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModulesArguments {
    /// The index of the first module to return; if omitted modules start at
    /// 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_module: Option<i64>,
    /// The number of modules to return. If `moduleCount` is not specified or
    /// 0, all modules are returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_count: Option<i64>,
}

// ---------------------------------------------------------------------------
// response bodies
// ---------------------------------------------------------------------------

/// Body of a `threads` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsResponseBody {
    /// All threads.
    pub threads: Vec<Thread>,
}

/// Body of a `stackTrace` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceResponseBody {
    /// The frames of the stack frame. If the array has length zero, there
    /// are no stack frames available. This means that there is no location
    /// information available.
    pub stack_frames: Vec<StackFrame>,
    /// The total number of frames available in the stack. If omitted or if
    /// `totalFrames` is larger than the available frames, a client is
    /// expected to request frames until a request returns less frames than
    /// requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<i64>,
}

/// Body of a `scopes` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScopesResponseBody {
    /// The scopes of the stack frame. If the array has length zero, there
    /// are no scopes available.
    pub scopes: Vec<Scope>,
}

/// Body of a `variables` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariablesResponseBody {
    /// All (or a range) of variables for the given variable reference.
    pub variables: Vec<Variable>,
}

/// Body of a `setVariable` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableResponseBody {
    /// The new value of the variable.
    pub value: String,
    /// The type of the new value. Typically shown in the UI when hovering
    /// over the value.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    /// If `variablesReference` is > 0, the new value is structured and its
    /// children can be retrieved by passing `variablesReference` to the
    /// `variables` request as long as execution remains suspended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    /// The number of named child variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    /// The number of indexed child variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
    /// A memory reference to a location appropriate for this result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_reference: Option<String>,
    /// A reference that allows the client to request the location where the
    /// new value is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_location_reference: Option<i64>,
}

/// Body of a `setExpression` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetExpressionResponseBody {
    /// The new value of the expression.
    pub value: String,
    /// The type of the value.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    /// Properties of a value that can be used to determine how to render the
    /// result in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_hint: Option<VariablePresentationHint>,
    /// If `variablesReference` is > 0, the evaluate result is structured and
    /// its children can be retrieved by passing `variablesReference` to the
    /// `variables` request as long as execution remains suspended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables_reference: Option<i64>,
    /// The number of named child variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_variables: Option<i64>,
    /// The number of indexed child variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_variables: Option<i64>,
    /// A memory reference to a location appropriate for this result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_reference: Option<String>,
    /// A reference that allows the client to request the location where the
    /// expression is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_location_reference: Option<i64>,
}

/// Body of a `source` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponseBody {
    /// Content of the source reference.
    pub content: String,
    /// Content type (MIME type) of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Body of a `continue` response.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinueResponseBody {
    /// The value true (or a missing property) signals to the client that all
    /// threads have been resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_continued: Option<bool>,
}

/// Body of a `setBreakpoints` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetBreakpointsResponseBody {
    /// Information about the breakpoints. The array elements are in the same
    /// order as the elements of the `breakpoints` (or the deprecated
    /// `lines`) array in the arguments.
    pub breakpoints: Vec<Breakpoint>,
}

/// Body of a `setFunctionBreakpoints` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetFunctionBreakpointsResponseBody {
    /// Information about the breakpoints. The array elements correspond to
    /// the elements of the `breakpoints` array.
    pub breakpoints: Vec<Breakpoint>,
}

/// Body of a `setDataBreakpoints` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetDataBreakpointsResponseBody {
    /// Information about the data breakpoints. The array elements correspond
    /// to the elements of the input argument `breakpoints` array.
    pub breakpoints: Vec<Breakpoint>,
}

/// Body of a `dataBreakpointInfo` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataBreakpointInfoResponseBody {
    /// An identifier for the data on which a data breakpoint can be
    /// registered with the `setDataBreakpoints` request or null if no data
    /// breakpoint is available.
    pub data_id: Option<String>,
    /// UI string that describes on what data the breakpoint is set on or why
    /// a data breakpoint is not available.
    pub description: String,
    /// Attribute lists the available access types for a potential data
    /// breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_types: Option<Vec<DataBreakpointAccessType>>,
    /// Attribute indicates that a potential data breakpoint could be
    /// persisted across sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_persist: Option<bool>,
}

/// Body of a `modules` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModulesResponseBody {
    /// All modules or range of modules.
    pub modules: Vec<Module>,
    /// The total number of modules available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_modules: Option<i64>,
}

/// Body of a `loadedSources` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSourcesResponseBody {
    /// Set of loaded sources.
    pub sources: Vec<Source>,
}

/// Body of an error response, wrapping the structured error message.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseBody {
    /// A structured error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stopped_reason_falls_back_to_other() {
        let body: StoppedEventBody = serde_json::from_value(json!({
            "reason": "function breakpoint",
            "threadId": 3
        }))
        .unwrap();
        assert_eq!(body.reason, StoppedReason::FunctionBreakpoint);

        let body: StoppedEventBody = serde_json::from_value(json!({
            "reason": "vendor specific",
            "threadId": 3
        }))
        .unwrap();
        assert_eq!(
            body.reason,
            StoppedReason::Other("vendor specific".to_string())
        );
    }

    #[test]
    fn unknown_payload_fields_are_ignored() {
        let thread: Thread = serde_json::from_value(json!({
            "id": 1,
            "name": "main",
            "someFutureField": {"nested": true}
        }))
        .unwrap();
        assert_eq!(thread.id, 1);
    }

    #[test]
    fn module_id_is_number_or_string() {
        let module: Module =
            serde_json::from_value(json!({"id": 7, "name": "libc"})).unwrap();
        assert_eq!(module.id, ModuleId::Number(7));

        let module: Module =
            serde_json::from_value(json!({"id": "dyld-cache", "name": "cache"})).unwrap();
        assert_eq!(module.id, ModuleId::String("dyld-cache".to_string()));
    }

    #[test]
    fn capabilities_decode_with_structured_entries() {
        let caps: Capabilities = serde_json::from_value(json!({
            "supportsConfigurationDoneRequest": true,
            "exceptionBreakpointFilters": [
                {"filter": "panic", "label": "Rust panics"}
            ],
            "supportedChecksumAlgorithms": ["MD5", "timestamp"]
        }))
        .unwrap();
        assert_eq!(caps.supports_configuration_done_request, Some(true));
        assert_eq!(
            caps.exception_breakpoint_filters.as_ref().unwrap()[0].filter,
            "panic"
        );
        assert_eq!(
            caps.supported_checksum_algorithms,
            Some(vec![ChecksumAlgorithm::MD5, ChecksumAlgorithm::Timestamp])
        );
    }

    #[test]
    fn skipped_options_keep_wire_payloads_small() {
        let frame = StackFrame {
            id: 1,
            name: "main".to_string(),
            source: None,
            line: 10,
            column: 1,
            end_line: None,
            end_column: None,
            can_restart: None,
            instruction_pointer_reference: None,
            module_id: None,
            presentation_hint: None,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            json,
            json!({"id": 1, "name": "main", "line": 10, "column": 1})
        );
    }
}
