use airfoil_opt::airfoil::generate::{AirfoilGenerator, GeometryFormat};
use airfoil_opt::observe::TracingObserver;
use airfoil_opt::settings::Settings;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_file(Path::new(&path))?,
        None => Settings::default(),
    };

    let ic = settings.freestream()?;
    println!("U_inf = {:.6} m/s", ic.u_inf);
    println!("Ma    = {:.6}", ic.mach);
    println!("k     = {:.6e}", ic.k);
    println!("omega = {:.6e}", ic.omega);
    println!("nu    = {:.6e}", ic.nu);
    println!("mu    = {:.6e}", ic.mu);

    let params = settings.bounds.midpoint();
    let mut generator = AirfoilGenerator::new(settings.discretization())?
        .with_observer(TracingObserver);

    let dir = Path::new(".");
    for format in [
        GeometryFormat::CoordinateList,
        GeometryFormat::ClosedSurface(Default::default()),
    ] {
        generator = generator.with_format(format);
        let path = generator.write(&params, "airfoil", dir)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
