use std::sync::Arc;

use clap::Parser;
use fivol::field::CellField;
use fivol::mesh::{CartesianMesh, Mesh};
use fivol::select;

/// Explicit convection-diffusion of a pulse on a uniform 1D mesh. The
/// convective flux uses the interpolated face value, the diffusive flux the
/// normal face gradient; both come straight from the field operators.
#[derive(Debug, Parser)]
struct Opts {
    #[clap(short = 'n', long, default_value = "100")]
    num_cells: usize,

    #[clap(short = 'u', long, default_value = "1.0")]
    velocity: f64,

    #[clap(short = 'd', long, default_value = "0.01")]
    diffusivity: f64,

    #[clap(short = 's', long, default_value = "200")]
    num_steps: usize,

    /// Run the explicitly indexed kernel path instead of the vectorized one
    #[clap(long)]
    kernels: bool,
}

#[derive(serde::Serialize)]
struct State {
    iteration: u64,
    time: f64,
    phi: CellField<CartesianMesh>,
}

// ============================================================================
fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let opts = Opts::parse();
    select::init_from(if opts.kernels {
        vec![select::KERNEL_FLAG]
    } else {
        vec![]
    });

    let dx = 1.0 / opts.num_cells as f64;
    let dt = (0.25 * dx / opts.velocity.abs()).min(0.25 * dx * dx / opts.diffusivity);
    let mesh = Arc::new(CartesianMesh::line(opts.num_cells, dx));

    let pulse: Vec<f64> = (0..mesh.num_cells())
        .map(|cell| {
            let (x, _) = mesh.cell_center(cell);
            (-((x - 0.25) / 0.05).powi(2)).exp()
        })
        .collect();
    let mut phi = CellField::new(mesh.clone(), "phi", pulse.into(), true).unwrap();

    let mut time = 0.0;
    for iteration in 1..=opts.num_steps {
        phi.commit_old();

        let face_value = phi.old().face_value();
        let face_grad = phi.old().face_grad();
        let next: Vec<f64> = (0..mesh.num_cells())
            .map(|cell| {
                let net_flux: f64 = mesh
                    .cell_faces(cell)
                    .iter()
                    .map(|&face| {
                        let normal = mesh.face_normal(face);
                        let advective = opts.velocity * normal.0 * face_value[face];
                        let diffusive = -opts.diffusivity * normal.dot(face_grad[face]);
                        mesh.face_orientation(face, cell)
                            * mesh.face_area(face)
                            * (advective + diffusive)
                    })
                    .sum();
                phi.old().values()[cell] - dt * net_flux / mesh.cell_volume(cell)
            })
            .collect();
        phi.set_value(next, &[]).unwrap();

        time += dt;
        if iteration % 50 == 0 {
            let peak = phi
                .values()
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            println!("[{}] t={:.4} peak={:.6}", iteration, time, peak);
        }
    }

    let peak_cell = (0..mesh.num_cells())
        .max_by(|&a, &b| {
            phi.values()[a]
                .partial_cmp(&phi.values()[b])
                .unwrap()
        })
        .unwrap();
    log::info!(
        "pulse peak ended at x={:.4}",
        mesh.cell_center(peak_cell).0
    );

    let state = State {
        iteration: opts.num_steps as u64,
        time,
        phi,
    };
    let file = std::fs::File::create("convection1d.cbor").unwrap();
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&state, &mut buffer).unwrap();
    log::info!("final state written to convection1d.cbor");
}
