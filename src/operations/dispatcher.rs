//! # Dispatcher
//!
//! Shared state for action handlers. Handlers receive nothing but the
//! dispatcher; every parameter they need is read through its accessors,
//! which merge command line values over the loaded configuration.

use super::action::Action;
use crate::config::RmgConfig;
use crate::endpoints::KnownEndpointCatalog;
use crate::error::{Result, RmgError};
use crate::options::{OptionValues, RmgOption};
use crate::output::Printer;
use crate::protocol::{
    Connection, Endpoint, Gadget, ObjId, ProtocolRuntime, RemoteTarget, RmiComponent,
    SsrfSettings,
};
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Signature every action handler shares
pub type Handler = fn(&Dispatcher) -> Result<()>;

pub struct Dispatcher {
    action: Action,
    values: OptionValues,
    config: RmgConfig,
    runtime: Arc<dyn ProtocolRuntime>,
    catalog: Arc<KnownEndpointCatalog>,
    printer: Mutex<Printer>,
}

impl Dispatcher {
    /// Handler names the action table may refer to
    pub const HANDLERS: &'static [(&'static str, Handler)] = &[
        ("dispatch_bind", Dispatcher::dispatch_bind as Handler),
        ("dispatch_call", Dispatcher::dispatch_call as Handler),
        ("dispatch_codebase", Dispatcher::dispatch_codebase as Handler),
        ("dispatch_enum", Dispatcher::dispatch_enum as Handler),
        ("dispatch_guess", Dispatcher::dispatch_guess as Handler),
        ("dispatch_known", Dispatcher::dispatch_known as Handler),
        ("dispatch_listen", Dispatcher::dispatch_listen as Handler),
        ("dispatch_objid", Dispatcher::dispatch_objid as Handler),
        ("dispatch_rebind", Dispatcher::dispatch_rebind as Handler),
        ("dispatch_rogue_jmx", Dispatcher::dispatch_rogue_jmx as Handler),
        ("dispatch_port_scan", Dispatcher::dispatch_port_scan as Handler),
        ("dispatch_serial", Dispatcher::dispatch_serial as Handler),
        ("dispatch_unbind", Dispatcher::dispatch_unbind as Handler),
    ];

    pub fn new(
        action: Action,
        values: OptionValues,
        config: RmgConfig,
        runtime: Arc<dyn ProtocolRuntime>,
        catalog: Arc<KnownEndpointCatalog>,
    ) -> Self {
        let color = !(values.flag(RmgOption::GlobalNoColor) || config.output.no_color);
        Self {
            action,
            values,
            config,
            runtime,
            catalog,
            printer: Mutex::new(Printer::stdout(color)),
        }
    }

    /// Replace the report sink (tests use a buffered printer)
    pub fn with_printer(mut self, printer: Printer) -> Self {
        self.printer = Mutex::new(printer);
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn values(&self) -> &OptionValues {
        &self.values
    }

    pub fn config(&self) -> &RmgConfig {
        &self.config
    }

    pub fn runtime(&self) -> &dyn ProtocolRuntime {
        self.runtime.as_ref()
    }

    pub fn catalog(&self) -> &KnownEndpointCatalog {
        &self.catalog
    }

    pub fn verbose(&self) -> bool {
        self.values.flag(RmgOption::GlobalVerbose) || self.config.output.verbose
    }

    /// Run `write` with exclusive access to the printer
    pub(crate) fn print<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut Printer) -> io::Result<()>,
    {
        let mut printer = self.printer.lock();
        write(&mut printer)?;
        Ok(())
    }

    pub(crate) fn with_printer_mut<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Printer) -> Result<()>,
    {
        let mut printer = self.printer.lock();
        f(&mut printer)
    }

    fn missing(&self, option: RmgOption) -> RmgError {
        RmgError::MissingOption {
            option,
            action: self.action,
        }
    }

    fn invalid(option: RmgOption, value: impl fmt::Display, reason: &str) -> RmgError {
        RmgError::InvalidOptionValue {
            option,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn require_text(&self, option: RmgOption) -> Result<&str> {
        self.values
            .text(option)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| self.missing(option))
    }

    pub(crate) fn optional_text(&self, option: RmgOption) -> Option<String> {
        self.values.text(option).map(str::to_string)
    }

    pub(crate) fn require_port(&self, option: RmgOption) -> Result<u16> {
        let raw = self
            .values
            .integer(option)
            .ok_or_else(|| self.missing(option))?;
        Self::port(option, raw)
    }

    fn port(option: RmgOption, raw: i64) -> Result<u16> {
        match u16::try_from(raw) {
            Ok(0) | Err(_) => Err(Self::invalid(option, raw, "expected a port between 1 and 65535")),
            Ok(port) => Ok(port),
        }
    }

    pub(crate) fn optional_objid(&self, option: RmgOption) -> Result<Option<ObjId>> {
        self.values
            .text(option)
            .map(|raw| raw.parse::<ObjId>().map_err(|reason| Self::invalid(option, raw, &reason)))
            .transpose()
    }

    /// Positive integer option, `None` when absent
    pub(crate) fn optional_count(&self, option: RmgOption) -> Result<Option<usize>> {
        self.values
            .integer(option)
            .map(|raw| match usize::try_from(raw) {
                Ok(value) if value > 0 => Ok(value),
                _ => Err(Self::invalid(option, raw, "expected a positive number")),
            })
            .transpose()
    }

    pub(crate) fn threads(&self) -> Result<usize> {
        Ok(self
            .optional_count(RmgOption::Threads)?
            .unwrap_or(self.config.guess.threads))
    }

    pub(crate) fn progress(&self) -> bool {
        !self.values.flag(RmgOption::NoProgress)
    }

    /// Millisecond duration option, falling back to `default_ms`
    pub(crate) fn timeout(&self, option: RmgOption, default_ms: u64) -> Result<Duration> {
        let millis = match self.optional_count(option)? {
            Some(value) => value as u64,
            None => default_ms,
        };
        Ok(Duration::from_millis(millis))
    }

    /// Target connection from the host and port positionals merged with the
    /// connection settings
    pub(crate) fn connection(&self) -> Result<Connection> {
        let host = self.require_text(RmgOption::TargetHost)?;
        let port = self.require_port(RmgOption::TargetPort)?;
        let settings = &self.config.connection;

        Ok(Connection {
            endpoint: Endpoint::new(host, port),
            ssl: self.values.flag(RmgOption::ConnSsl) || settings.ssl,
            follow: self.values.flag(RmgOption::ConnFollow) || settings.follow,
            socket_factory: self.optional_text(RmgOption::SocketFactory),
            socket_factory_ssl: self.values.flag(RmgOption::SocketFactorySsl),
            socket_factory_plain: self.values.flag(RmgOption::SocketFactoryPlain),
            connect_timeout: settings.connect_timeout(),
            read_timeout: settings.read_timeout(),
            ssrf: self.ssrf(),
        })
    }

    fn ssrf(&self) -> Option<SsrfSettings> {
        let response = self.optional_text(RmgOption::SsrfResponse);
        if !self.values.flag(RmgOption::Ssrf) && response.is_none() {
            return None;
        }

        Some(SsrfSettings {
            gopher: self.values.flag(RmgOption::SsrfGopher),
            encode: self.values.flag(RmgOption::SsrfEncode),
            raw: self.values.flag(RmgOption::SsrfRaw),
            stream_protocol: self.values.flag(RmgOption::SsrfStreamProtocol),
            response,
        })
    }

    /// Listener address from an ip and a port option
    pub(crate) fn listener(&self, ip: RmgOption, port: RmgOption) -> Result<Endpoint> {
        let host = self.require_text(ip)?;
        let port = self.require_port(port)?;
        Ok(Endpoint::new(host, port))
    }

    /// Remote object selected by `--bound-name`, `--objid` or `--component`,
    /// in that order of precedence
    pub(crate) fn remote_target(&self) -> Result<RemoteTarget> {
        if let Some(bound_name) = self.values.text(RmgOption::TargetBoundName) {
            return Ok(RemoteTarget::BoundName(bound_name.to_string()));
        }

        if let Some(objid) = self.optional_objid(RmgOption::TargetObjid)? {
            return Ok(RemoteTarget::ObjId(objid));
        }

        match self.values.text(RmgOption::TargetComponent) {
            Some(raw) => RmiComponent::from_short_name(raw)
                .map(RemoteTarget::Component)
                .ok_or_else(|| Self::invalid(RmgOption::TargetComponent, raw, "expected act, dgc or reg")),
            None => Err(self.missing(RmgOption::TargetBoundName)),
        }
    }

    pub(crate) fn gadget(&self, name: RmgOption, command: RmgOption) -> Result<Gadget> {
        Ok(Gadget {
            name: self.require_text(name)?.to_string(),
            command: self.require_text(command)?.to_string(),
            ysoserial: self.values.path(RmgOption::Yso).map(|path| path.to_path_buf()),
        })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("action", &self.action)
            .field("values", &self.values)
            .field("catalog", &self.catalog.len())
            .finish()
    }
}
