pub mod loan;
