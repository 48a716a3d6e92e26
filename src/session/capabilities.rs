//! Capability bookkeeping.
//!
//! Both sides of a DAP session declare feature sets during the handshake.
//! The boolean capabilities become identity entries in plain sets so that
//! request gating is a set lookup; the structured capability payloads
//! (exception filters, module columns, ...) are cloned and owned here.

use crate::dap::types::{
    BreakpointMode, Capabilities, ChecksumAlgorithm, ColumnDescriptor,
    ExceptionBreakpointsFilter, InitializeRequestArguments,
};
use crate::dap::Command;
use std::collections::HashSet;

/// Boolean features a debug adapter can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum AdapterCapability {
    ConfigurationDoneRequest,
    FunctionBreakpoints,
    ConditionalBreakpoints,
    HitConditionalBreakpoints,
    EvaluateForHovers,
    StepBack,
    SetVariable,
    RestartFrame,
    GotoTargetsRequest,
    StepInTargetsRequest,
    CompletionsRequest,
    ModulesRequest,
    RestartRequest,
    ExceptionOptions,
    ValueFormattingOptions,
    ExceptionInfoRequest,
    TerminateDebuggee,
    SuspendDebuggee,
    DelayedStackTraceLoading,
    LoadedSourcesRequest,
    LogPoints,
    TerminateThreadsRequest,
    SetExpression,
    TerminateRequest,
    DataBreakpoints,
    ReadMemoryRequest,
    WriteMemoryRequest,
    DisassembleRequest,
    CancelRequest,
    BreakpointLocationsRequest,
    ClipboardContext,
    SteppingGranularity,
    InstructionBreakpoints,
    ExceptionFilterOptions,
    SingleThreadExecutionRequests,
    DataBreakpointBytes,
    AnsiStyling,
}

/// Boolean features this client announces in `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ClientCapability {
    VariableType,
    VariablePaging,
    MemoryReferences,
    ProgressReporting,
    InvalidatedEvent,
    MemoryEvent,
}

/// Non-boolean capability payloads, cloned out of the adapter's report.
#[derive(Debug, Default, Clone)]
pub struct CapabilityExtras {
    pub exception_breakpoint_filters: Vec<ExceptionBreakpointsFilter>,
    pub completion_trigger_characters: Vec<String>,
    pub additional_module_columns: Vec<ColumnDescriptor>,
    pub supported_checksum_algorithms: Vec<ChecksumAlgorithm>,
    pub breakpoint_modes: Vec<BreakpointMode>,
}

/// The adapter's feature set, empty until the `initialize` response arrives
/// and updated again on every `capabilities` event.
#[derive(Debug, Default, Clone)]
pub struct AdapterCapabilities {
    set: HashSet<AdapterCapability>,
    extras: CapabilityExtras,
    known: bool,
}

impl AdapterCapabilities {
    /// True once the adapter reported anything at all. Request gating is
    /// permissive before that: the handshake has to be schedulable before
    /// the initialize response arrives.
    pub fn known(&self) -> bool {
        self.known
    }

    pub fn supports(&self, capability: AdapterCapability) -> bool {
        self.set.contains(&capability)
    }

    pub fn extras(&self) -> &CapabilityExtras {
        &self.extras
    }

    /// Merge a `Capabilities` payload. A capability that was announced
    /// earlier stays announced unless the new payload explicitly reports it
    /// as false.
    pub fn merge(&mut self, caps: &Capabilities) {
        self.known = true;

        let mut apply = |flag: Option<bool>, capability: AdapterCapability| match flag {
            Some(true) => {
                self.set.insert(capability);
            }
            Some(false) => {
                self.set.remove(&capability);
            }
            None => {}
        };

        apply(
            caps.supports_configuration_done_request,
            AdapterCapability::ConfigurationDoneRequest,
        );
        apply(
            caps.supports_function_breakpoints,
            AdapterCapability::FunctionBreakpoints,
        );
        apply(
            caps.supports_conditional_breakpoints,
            AdapterCapability::ConditionalBreakpoints,
        );
        apply(
            caps.supports_hit_conditional_breakpoints,
            AdapterCapability::HitConditionalBreakpoints,
        );
        apply(
            caps.supports_evaluate_for_hovers,
            AdapterCapability::EvaluateForHovers,
        );
        apply(caps.supports_step_back, AdapterCapability::StepBack);
        apply(caps.supports_set_variable, AdapterCapability::SetVariable);
        apply(caps.supports_restart_frame, AdapterCapability::RestartFrame);
        apply(
            caps.supports_goto_targets_request,
            AdapterCapability::GotoTargetsRequest,
        );
        apply(
            caps.supports_step_in_targets_request,
            AdapterCapability::StepInTargetsRequest,
        );
        apply(
            caps.supports_completions_request,
            AdapterCapability::CompletionsRequest,
        );
        apply(
            caps.supports_modules_request,
            AdapterCapability::ModulesRequest,
        );
        apply(
            caps.supports_restart_request,
            AdapterCapability::RestartRequest,
        );
        apply(
            caps.supports_exception_options,
            AdapterCapability::ExceptionOptions,
        );
        apply(
            caps.supports_value_formatting_options,
            AdapterCapability::ValueFormattingOptions,
        );
        apply(
            caps.supports_exception_info_request,
            AdapterCapability::ExceptionInfoRequest,
        );
        apply(
            caps.support_terminate_debuggee,
            AdapterCapability::TerminateDebuggee,
        );
        apply(
            caps.support_suspend_debuggee,
            AdapterCapability::SuspendDebuggee,
        );
        apply(
            caps.supports_delayed_stack_trace_loading,
            AdapterCapability::DelayedStackTraceLoading,
        );
        apply(
            caps.supports_loaded_sources_request,
            AdapterCapability::LoadedSourcesRequest,
        );
        apply(caps.supports_log_points, AdapterCapability::LogPoints);
        apply(
            caps.supports_terminate_threads_request,
            AdapterCapability::TerminateThreadsRequest,
        );
        apply(caps.supports_set_expression, AdapterCapability::SetExpression);
        apply(
            caps.supports_terminate_request,
            AdapterCapability::TerminateRequest,
        );
        apply(
            caps.supports_data_breakpoints,
            AdapterCapability::DataBreakpoints,
        );
        apply(
            caps.supports_read_memory_request,
            AdapterCapability::ReadMemoryRequest,
        );
        apply(
            caps.supports_write_memory_request,
            AdapterCapability::WriteMemoryRequest,
        );
        apply(
            caps.supports_disassemble_request,
            AdapterCapability::DisassembleRequest,
        );
        apply(caps.supports_cancel_request, AdapterCapability::CancelRequest);
        apply(
            caps.supports_breakpoint_locations_request,
            AdapterCapability::BreakpointLocationsRequest,
        );
        apply(
            caps.supports_clipboard_context,
            AdapterCapability::ClipboardContext,
        );
        apply(
            caps.supports_stepping_granularity,
            AdapterCapability::SteppingGranularity,
        );
        apply(
            caps.supports_instruction_breakpoints,
            AdapterCapability::InstructionBreakpoints,
        );
        apply(
            caps.supports_exception_filter_options,
            AdapterCapability::ExceptionFilterOptions,
        );
        apply(
            caps.supports_single_thread_execution_requests,
            AdapterCapability::SingleThreadExecutionRequests,
        );
        apply(
            caps.supports_data_breakpoint_bytes,
            AdapterCapability::DataBreakpointBytes,
        );
        apply(caps.supports_ansi_styling, AdapterCapability::AnsiStyling);

        if let Some(filters) = &caps.exception_breakpoint_filters {
            self.extras.exception_breakpoint_filters = filters.clone();
        }
        if let Some(chars) = &caps.completion_trigger_characters {
            self.extras.completion_trigger_characters = chars.clone();
        }
        if let Some(columns) = &caps.additional_module_columns {
            self.extras.additional_module_columns = columns.clone();
        }
        if let Some(algorithms) = &caps.supported_checksum_algorithms {
            self.extras.supported_checksum_algorithms = algorithms.clone();
        }
        if let Some(modes) = &caps.breakpoint_modes {
            self.extras.breakpoint_modes = modes.clone();
        }
    }
}

/// The capability an adapter must have announced before the client may send
/// `command`, for the commands DAP gates behind one.
pub fn required_capability(command: Command) -> Option<AdapterCapability> {
    match command {
        Command::ConfigurationDone => Some(AdapterCapability::ConfigurationDoneRequest),
        Command::SetFunctionBreakpoints => Some(AdapterCapability::FunctionBreakpoints),
        Command::SetDataBreakpoints | Command::DataBreakpointInfo => {
            Some(AdapterCapability::DataBreakpoints)
        }
        Command::StepBack | Command::ReverseContinue => Some(AdapterCapability::StepBack),
        Command::SetVariable => Some(AdapterCapability::SetVariable),
        Command::RestartFrame => Some(AdapterCapability::RestartFrame),
        Command::Goto | Command::GotoTargets => Some(AdapterCapability::GotoTargetsRequest),
        Command::StepInTargets => Some(AdapterCapability::StepInTargetsRequest),
        Command::Completions => Some(AdapterCapability::CompletionsRequest),
        Command::Modules => Some(AdapterCapability::ModulesRequest),
        Command::Restart => Some(AdapterCapability::RestartRequest),
        Command::ExceptionInfo => Some(AdapterCapability::ExceptionInfoRequest),
        Command::LoadedSources => Some(AdapterCapability::LoadedSourcesRequest),
        Command::TerminateThreads => Some(AdapterCapability::TerminateThreadsRequest),
        Command::SetExpression => Some(AdapterCapability::SetExpression),
        Command::Terminate => Some(AdapterCapability::TerminateRequest),
        Command::ReadMemory => Some(AdapterCapability::ReadMemoryRequest),
        Command::WriteMemory => Some(AdapterCapability::WriteMemoryRequest),
        Command::Disassemble => Some(AdapterCapability::DisassembleRequest),
        Command::Cancel => Some(AdapterCapability::CancelRequest),
        Command::BreakpointLocations => Some(AdapterCapability::BreakpointLocationsRequest),
        Command::SetInstructionBreakpoints => Some(AdapterCapability::InstructionBreakpoints),
        _ => None,
    }
}

/// Compose the `initialize` arguments this client sends, from its own
/// capability set.
pub fn initialize_arguments(client: &HashSet<ClientCapability>) -> InitializeRequestArguments {
    let flag = |capability| client.contains(&capability).then_some(true);
    InitializeRequestArguments {
        client_id: Some("dapscope".to_string()),
        client_name: Some("dapscope".to_string()),
        adapter_id: "dapscope".to_string(),
        locale: Some("en-US".to_string()),
        lines_start_at1: Some(true),
        columns_start_at1: Some(true),
        path_format: Some("path".to_string()),
        supports_variable_type: flag(ClientCapability::VariableType),
        supports_variable_paging: flag(ClientCapability::VariablePaging),
        supports_run_in_terminal_request: None,
        supports_memory_references: flag(ClientCapability::MemoryReferences),
        supports_progress_reporting: flag(ClientCapability::ProgressReporting),
        supports_invalidated_event: flag(ClientCapability::InvalidatedEvent),
        supports_memory_event: flag(ClientCapability::MemoryEvent),
        supports_args_can_be_interpreted_by_shell: None,
        supports_start_debugging_request: None,
        supports_ansi_styling: None,
    }
}

/// The default client capability set: what this front-end actually renders.
pub fn default_client_capabilities() -> HashSet<ClientCapability> {
    HashSet::from([
        ClientCapability::VariableType,
        ClientCapability::MemoryReferences,
        ClientCapability::InvalidatedEvent,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates_and_retracts() {
        let mut caps = AdapterCapabilities::default();
        assert!(!caps.known());

        caps.merge(&Capabilities {
            supports_configuration_done_request: Some(true),
            supports_step_back: Some(true),
            ..Default::default()
        });
        assert!(caps.known());
        assert!(caps.supports(AdapterCapability::ConfigurationDoneRequest));
        assert!(caps.supports(AdapterCapability::StepBack));

        // A later capabilities event may retract a feature.
        caps.merge(&Capabilities {
            supports_step_back: Some(false),
            ..Default::default()
        });
        assert!(caps.supports(AdapterCapability::ConfigurationDoneRequest));
        assert!(!caps.supports(AdapterCapability::StepBack));
    }

    #[test]
    fn gated_commands_resolve_to_their_capability() {
        assert_eq!(
            required_capability(Command::SetFunctionBreakpoints),
            Some(AdapterCapability::FunctionBreakpoints)
        );
        assert_eq!(required_capability(Command::Threads), None);
        assert_eq!(required_capability(Command::Launch), None);
    }
}
