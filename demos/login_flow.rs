//! Walks through a login redirect: pick a launch target from a canned package inventory,
//! "launch" it, then feed the host lifecycle events back into the broker.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use auth_redirect_broker::{
	auth::{LoginId, LoginOutcome, PackageId},
	capability::StaticCapabilities,
	flows::RedirectBroker,
	launch::{LaunchError, Launcher},
	selector::{LaunchTarget, NativeProbeMode, SelectorConfig},
};

/// Prints what a real host would start.
struct PrintingLauncher;
impl Launcher for PrintingLauncher {
	fn launch(&self, target: &LaunchTarget, url: &Url) -> Result<(), LaunchError> {
		println!("Opening {url} via {target}.");

		Ok(())
	}
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = SelectorConfig::builder()
		.native_probe(NativeProbeMode::from_direct_exclusion_support(false))
		.build();
	let chrome = PackageId::new("com.android.chrome")?;
	let capabilities = StaticCapabilities::default()
		.with_browser(chrome.clone())
		.with_default_browser(chrome.clone())
		.with_isolated_session(chrome);
	let broker = RedirectBroker::new(config, Arc::new(capabilities), Arc::new(PrintingLauncher));
	let login = LoginId::generate();
	let url = Url::parse("https://accounts.example.com/oauth/authorize?state=demo-state")?;

	broker.start_login(login.clone(), &url, |outcome| match outcome {
		LoginOutcome::Redirect(response) => println!(
			"Redirect captured; state valid: {}, code: {:?}.",
			response.validate_state("demo-state"),
			response.param("code")
		),
		LoginOutcome::NoResponse => println!("Login abandoned."),
	})?;

	println!("Login {login} pending: {}.", broker.correlator.is_pending());

	// The host regains focus once right after launching; that return is ignored.
	broker.on_foreground_returned();
	broker.on_redirect_observed(Some("com.example.app://oauth/callback?state=demo-state&code=abc"));
	broker.on_foreground_returned();

	println!("Login {login} pending: {}.", broker.correlator.is_pending());

	Ok(())
}
