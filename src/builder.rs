use crate::chip8::Chip8;
use crate::context::{Context, PcgContext};
use crate::error::BuildError;

pub struct Builder<'a, C: Context> {
    context: Option<C>,
    program: Option<&'a [u8]>,
}

impl<'a, C: Context> Builder<'a, C> {
    pub fn new() -> Self {
        Self {
            context: None,
            program: None,
        }
    }

    pub fn with_context(mut self, ctx: C) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn with_program(mut self, prog: &'a [u8]) -> Self {
        self.program = Some(prog);
        self
    }

    pub fn build(self) -> Result<Chip8<C>, BuildError> {
        let context = self.context.ok_or(BuildError::MissingContext)?;
        let program = self.program.ok_or(BuildError::MissingProgram)?;
        Ok(Chip8::load(context, program)?)
    }
}

impl<'a> Builder<'a, PcgContext> {
    /// Use the default random generator seeded with `seed`
    pub fn with_seed(self, seed: u128) -> Self {
        self.with_context(PcgContext::new(seed))
    }
}

impl<'a, C: Context> Default for Builder<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::TestingContext;
    use crate::error::LoadError;
    use crate::memory::MAX_ROM_LENGTH;

    #[test]
    fn with_context_and_prog() {
        let result = Builder::new()
            .with_context(TestingContext::new(&[0]))
            .with_program(&[])
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn with_context_only() {
        let result = Builder::new()
            .with_context(TestingContext::new(&[0]))
            .build();
        assert_eq!(result.err(), Some(BuildError::MissingProgram));
    }

    #[test]
    fn with_program_only() {
        let result = Builder::<'_, TestingContext>::new()
            .with_program(&[])
            .build();
        assert_eq!(result.err(), Some(BuildError::MissingContext));
    }

    #[test]
    fn with_seed() {
        let chip = Builder::new().with_seed(7).with_program(&[0x00, 0xE0]).build();
        assert!(chip.is_ok());
    }

    #[test]
    fn oversized_program() {
        let rom = [0u8; MAX_ROM_LENGTH + 2];
        let result = Builder::new().with_seed(0).with_program(&rom[..]).build();
        assert_eq!(
            result.err(),
            Some(BuildError::Load(LoadError::RomTooLarge {
                len: MAX_ROM_LENGTH + 2,
                max: MAX_ROM_LENGTH,
            })),
        );
    }
}
