//! Print every CRD served by the operator as YAML
//!
//! `cargo run -p crds --bin crdgen > config/crds.yaml`

use crds::CrdRegistry;

fn main() -> anyhow::Result<()> {
    let registry = CrdRegistry::with_all_kinds();
    print!("{}", registry.to_yaml()?);
    Ok(())
}
