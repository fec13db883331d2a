pub mod cnf;
pub mod dimacs;
pub mod flatten;

pub use cnf::{Clause, Cnf, Literal};
pub use flatten::{
    clause_to_proposition, cnf_to_proposition, flatten_cnf, proposition_to_cnf, remove_redundancy,
    squeeze_variable_ids, squeeze_with_mapping,
};
