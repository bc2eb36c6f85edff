pub mod time;
pub mod value;

pub use self::{
    time::{parse_generalized_time, GeneralizedTime},
    value::NormalizedValue,
};
