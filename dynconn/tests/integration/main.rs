
mod test_algorithms;
mod test_bbf;
mod test_cutset;
mod test_etf;
mod test_link_cut;
