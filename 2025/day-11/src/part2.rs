use miette::*;

use crate::devices::{parse, CHECKPOINTS, OUT, SERVER};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = parse(input)?;

    Ok(network.count_paths(SERVER, OUT, &CHECKPOINTS)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "svr: aaa bbb
aaa: fft
fft: ccc
bbb: tty
tty: ccc
ccc: ddd eee
ddd: hub
hub: fff
eee: dac
dac: fff
fff: ggg hhh
ggg: out
hhh: out";
        assert_eq!("2", process(input)?);
        Ok(())
    }

    #[test]
    fn paths_missing_a_checkpoint_do_not_count() -> Result<()> {
        assert_eq!("0", process("svr: dac out\ndac: out\n")?);
        Ok(())
    }
}
