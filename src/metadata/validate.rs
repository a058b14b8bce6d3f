use super::DeviceInfo;

/// Errors found while checking the cross references of a [`DeviceInfo`].
#[derive(Debug, thiserror::Error)]
#[error("{}", display_vec(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("register {register} references undefined mask '{mask}'")]
    UndefinedMask { register: String, mask: String },

    #[error("payload member {register}.{member} references undefined mask '{mask}'")]
    UndefinedMemberMask {
        register: String,
        member: String,
        mask: String,
    },

    #[error("registers {first} and {second} share address {address}")]
    DuplicateAddress {
        address: u8,
        first: String,
        second: String,
    },
}

impl DeviceInfo {
    /// Checks that every `maskType` names a declared mask and that no two
    /// registers share an address.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        for (name, register) in &self.registers {
            if let Some((first, _)) = self
                .register_at(register.address)
                .filter(|(first, _)| *first != name.as_str())
            {
                errors.push(ValidationError::DuplicateAddress {
                    address: register.address,
                    first: first.to_string(),
                    second: name.clone(),
                });
            }

            if let Some(mask) = register.mask_type.as_ref() {
                if !self.has_mask(mask) {
                    errors.push(ValidationError::UndefinedMask {
                        register: name.clone(),
                        mask: mask.clone(),
                    });
                }
            }

            for (member, spec) in register.payload_spec.iter().flatten() {
                if let Some(mask) = spec.mask_type.as_ref() {
                    if !self.has_mask(mask) {
                        errors.push(ValidationError::UndefinedMemberMask {
                            register: name.clone(),
                            member: member.clone(),
                            mask: mask.clone(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

struct DisplayVec<'a, T: std::fmt::Display>(&'a Vec<T>);

impl<T: std::fmt::Display> std::fmt::Display for DisplayVec<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut value_iter = self.0.iter();

        let first_value = match value_iter.next() {
            Some(v) => v,
            None => return Ok(()),
        };

        first_value.fmt(f)?;

        for val in value_iter {
            write!(f, "\n{val}")?;
        }

        Ok(())
    }
}

fn display_vec<T: std::fmt::Display>(errors: &Vec<T>) -> DisplayVec<'_, T> {
    DisplayVec(errors)
}
