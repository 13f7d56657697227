//! Destination specifiers for xcodebuild invocations
//!
//! A [`Destination`] describes the device, simulator, or Mac a build or
//! test run targets. It renders as the single-quoted comma-joined
//! `key=value` token the `-destination` option expects, e.g.
//! `'platform=iOS Simulator,name=iPhone 6,OS=11.2'`.
//!
//! Field rules depend on the platform:
//! - `macOS` takes only an architecture (default `x86_64`).
//! - Devices and simulators are identified by `name`, `id`, or both;
//!   constructing one with neither is an error.
//! - Simulators identified by `name` carry an `OS` version, defaulting to
//!   `latest`; when an `id` is given the OS key is dropped.
//! - watchOS targets are always expressed through their paired iOS
//!   destination, so the watch constructors delegate to the iOS ones.

use thiserror::Error;

use crate::command::Commandable;

/// Errors from destination construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DestinationError {
    /// A device or simulator destination needs at least one of `name`/`id`.
    #[error("destination for {platform} must provide a device name or id")]
    MissingDeviceIdentity { platform: Platform },
}

/// The destination platforms xcodebuild supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Ios,
    IosSimulator,
    WatchOs,
    WatchOsSimulator,
    TvOs,
    TvOsSimulator,
}

impl Platform {
    /// The spelling used in destination specifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOs => "macOS",
            Platform::Ios => "iOS",
            Platform::IosSimulator => "iOS Simulator",
            Platform::WatchOs => "watchOS",
            Platform::WatchOsSimulator => "watchOS Simulator",
            Platform::TvOs => "tvOS",
            Platform::TvOsSimulator => "tvOS Simulator",
        }
    }

    /// Whether this platform is a simulator.
    pub fn is_simulator(&self) -> bool {
        matches!(
            self,
            Platform::IosSimulator | Platform::WatchOsSimulator | Platform::TvOsSimulator
        )
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Architectures accepted by the `arch` destination key and the `-arch`
/// option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    /// 64-bit macOS and simulators. The macOS default.
    X86_64,
    /// 32-bit macOS and simulators.
    I386,
    /// 32-bit devices up to iPhone 4S / iPad 3.
    Armv7,
    /// 32-bit devices: iPhone 5/5C, iPad 4.
    Armv7s,
    /// 64-bit devices, iPhone 5s and later.
    Arm64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86_64 => "x86_64",
            Architecture::I386 => "i386",
            Architecture::Armv7 => "armv7",
            Architecture::Armv7s => "armv7s",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated destination specifier.
///
/// Only constructible through the per-platform constructors, so every value
/// satisfies the field rules for its platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    platform: Platform,
    architecture: Option<Architecture>,
    id: Option<String>,
    name: Option<String>,
    os: Option<String>,
}

impl Destination {
    /// The local Mac with the default `x86_64` architecture.
    pub fn mac_os() -> Destination {
        Self::mac_os_arch(Architecture::X86_64)
    }

    /// The local Mac with an explicit architecture.
    pub fn mac_os_arch(arch: Architecture) -> Destination {
        Destination {
            platform: Platform::MacOs,
            architecture: Some(arch),
            id: None,
            name: None,
            os: None,
        }
    }

    /// An iOS device, identified by name, id, or both.
    pub fn ios(
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        Self::device(Platform::Ios, name, id)
    }

    /// A simulated iOS device. When identified by name, `os` selects the
    /// simulator runtime version and defaults to `latest`.
    pub fn ios_simulator(
        name: Option<&str>,
        id: Option<&str>,
        os: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        Self::simulator(Platform::IosSimulator, name, id, os)
    }

    /// A watchOS device. Watch apps build nested inside an iOS app, so this
    /// is the paired iOS destination.
    pub fn watch_os(
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        Self::ios(name, id)
    }

    /// A simulated watchOS device, expressed as its paired iOS Simulator
    /// destination.
    pub fn watch_os_simulator(
        name: Option<&str>,
        id: Option<&str>,
        os: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        Self::ios_simulator(name, id, os)
    }

    /// A tvOS device, identified by name, id, or both.
    pub fn tv_os(
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        Self::device(Platform::TvOs, name, id)
    }

    /// A simulated tvOS device; same OS defaulting as
    /// [`ios_simulator`](Destination::ios_simulator).
    pub fn tv_os_simulator(
        name: Option<&str>,
        id: Option<&str>,
        os: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        Self::simulator(Platform::TvOsSimulator, name, id, os)
    }

    fn device(
        platform: Platform,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        if name.is_none() && id.is_none() {
            return Err(DestinationError::MissingDeviceIdentity { platform });
        }
        Ok(Destination {
            platform,
            architecture: None,
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            os: None,
        })
    }

    fn simulator(
        platform: Platform,
        name: Option<&str>,
        id: Option<&str>,
        os: Option<&str>,
    ) -> Result<Destination, DestinationError> {
        if name.is_none() && id.is_none() {
            return Err(DestinationError::MissingDeviceIdentity { platform });
        }
        // The OS key only applies when selecting a simulator by name.
        let os = if name.is_some() && id.is_none() {
            Some(os.unwrap_or("latest").to_string())
        } else {
            None
        };
        Ok(Destination {
            platform,
            architecture: None,
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            os,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn architecture(&self) -> Option<Architecture> {
        self.architecture
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn os(&self) -> Option<&str> {
        self.os.as_deref()
    }
}

impl Commandable for Destination {
    fn arguments(&self) -> Vec<String> {
        let pairs = [
            ("platform", Some(self.platform.as_str().to_string())),
            ("arch", self.architecture.map(|a| a.as_str().to_string())),
            ("name", self.name.clone()),
            ("id", self.id.clone()),
            ("OS", self.os.clone()),
        ];
        let specifier = pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
            .collect::<Vec<_>>()
            .join(",");
        vec![format!("'{}'", specifier)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_os_default_arch() {
        let dest = Destination::mac_os();
        assert_eq!(dest.command(), "'platform=macOS,arch=x86_64'");
        assert_eq!(dest.arguments(), vec!["'platform=macOS,arch=x86_64'"]);
    }

    #[test]
    fn test_mac_os_explicit_arch() {
        let dest = Destination::mac_os_arch(Architecture::I386);
        assert_eq!(dest.command(), "'platform=macOS,arch=i386'");
    }

    #[test]
    fn test_ios_by_name() {
        let dest = Destination::ios(Some("iPhone 6"), None).unwrap();
        assert_eq!(dest.command(), "'platform=iOS,name=iPhone 6'");
    }

    #[test]
    fn test_ios_by_name_and_id() {
        let dest = Destination::ios(Some("iPhone 6s"), Some("6s")).unwrap();
        assert_eq!(dest.command(), "'platform=iOS,name=iPhone 6s,id=6s'");
    }

    #[test]
    fn test_ios_simulator_with_os() {
        let dest = Destination::ios_simulator(Some("iPhone 6"), None, Some("11.2")).unwrap();
        assert_eq!(
            dest.command(),
            "'platform=iOS Simulator,name=iPhone 6,OS=11.2'"
        );
    }

    #[test]
    fn test_ios_simulator_os_defaults_to_latest() {
        let dest = Destination::ios_simulator(Some("iPhone 6"), None, None).unwrap();
        assert_eq!(
            dest.command(),
            "'platform=iOS Simulator,name=iPhone 6,OS=latest'"
        );
    }

    #[test]
    fn test_simulator_by_id_drops_os() {
        let dest =
            Destination::ios_simulator(None, Some("ABCD-1234"), Some("11.2")).unwrap();
        assert_eq!(dest.command(), "'platform=iOS Simulator,id=ABCD-1234'");
        assert!(dest.os().is_none());
    }

    #[test]
    fn test_device_without_identity_is_rejected() {
        for (result, platform) in [
            (Destination::ios(None, None), Platform::Ios),
            (Destination::tv_os(None, None), Platform::TvOs),
            (
                Destination::ios_simulator(None, None, None),
                Platform::IosSimulator,
            ),
            (
                Destination::tv_os_simulator(None, None, Some("9.0")),
                Platform::TvOsSimulator,
            ),
        ] {
            assert_eq!(
                result.unwrap_err(),
                DestinationError::MissingDeviceIdentity { platform }
            );
        }
    }

    #[test]
    fn test_watch_os_delegates_to_ios() {
        let watch = Destination::watch_os(Some("iPhone 6"), None).unwrap();
        assert_eq!(watch.platform(), Platform::Ios);
        assert_eq!(watch.command(), "'platform=iOS,name=iPhone 6'");

        let watch_sim = Destination::watch_os_simulator(Some("iPhone 6"), None, None).unwrap();
        assert_eq!(watch_sim.platform(), Platform::IosSimulator);
        assert_eq!(
            watch_sim.command(),
            "'platform=iOS Simulator,name=iPhone 6,OS=latest'"
        );

        assert!(Destination::watch_os(None, None).is_err());
    }

    #[test]
    fn test_tv_os_simulator() {
        let dest = Destination::tv_os_simulator(Some("Apple TV 4K"), None, Some("9.0")).unwrap();
        assert_eq!(
            dest.command(),
            "'platform=tvOS Simulator,name=Apple TV 4K,OS=9.0'"
        );
    }

    #[test]
    fn test_platform_strings() {
        assert_eq!(Platform::MacOs.as_str(), "macOS");
        assert_eq!(Platform::WatchOsSimulator.as_str(), "watchOS Simulator");
        assert!(Platform::IosSimulator.is_simulator());
        assert!(!Platform::Ios.is_simulator());
    }
}
